//! Distribution shape in the synthesized template.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::template_json;

    fn distribution_config() -> serde_json::Value {
        template_json()["Resources"]["SiteDistribution"]["Properties"]["DistributionConfig"]
            .clone()
    }

    #[test]
    fn test_should_declare_enabled_distribution() {
        assert_eq!(distribution_config()["Enabled"], json!(true));
    }

    #[test]
    fn test_should_declare_single_origin_behind_the_identity() {
        let config = distribution_config();
        let origins = config["Origins"].as_array().unwrap();
        assert_eq!(origins.len(), 1);

        assert_eq!(origins[0]["Id"], json!("origin1"));
        assert_eq!(
            origins[0]["DomainName"],
            json!({ "Fn::GetAtt": ["SiteBucket", "RegionalDomainName"] })
        );
        assert_eq!(
            origins[0]["S3OriginConfig"]["OriginAccessIdentity"],
            json!({
                "Fn::Join": [
                    "",
                    ["origin-access-identity/cloudfront/", { "Ref": "SiteOriginIdentity" }]
                ]
            })
        );
    }

    #[test]
    fn test_should_declare_exactly_one_default_behavior() {
        let config = distribution_config();
        assert_eq!(
            config["DefaultCacheBehavior"],
            json!({ "TargetOriginId": "origin1" })
        );
        assert!(config.get("CacheBehaviors").is_none());
    }

    #[test]
    fn test_should_leave_tuning_knobs_to_provider_defaults() {
        let config = distribution_config();
        let mut keys: Vec<&str> =
            config.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["DefaultCacheBehavior", "Enabled", "Origins"]);
    }
}
