//! The public-URL output and its post-provisioning resolution.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use edgestack_core::AttributeBindings;

    use crate::{site, template_json};

    #[test]
    fn test_should_emit_single_https_url_output() {
        let json = template_json();
        let outputs = json["Outputs"].as_object().unwrap();
        assert_eq!(outputs.len(), 1);

        let output = &outputs["CloudFrontURL"];
        assert_eq!(output["Description"], json!("The CloudFront distribution URL"));
        assert_eq!(
            output["Value"],
            json!({
                "Fn::Join": [
                    "",
                    ["https://", { "Fn::GetAtt": ["SiteDistribution", "DomainName"] }]
                ]
            })
        );
    }

    #[test]
    fn test_should_not_hard_code_any_hostname() {
        let rendered = site().to_template().to_json().unwrap();
        assert!(!rendered.contains("cloudfront.net"));
        assert!(!rendered.contains("amazonaws.com"));
    }

    #[test]
    fn test_should_resolve_url_from_engine_bindings() {
        let site = site();
        let mut bindings = AttributeBindings::new();
        bindings.bind_attribute(
            site.distribution_id().clone(),
            "DomainName",
            "d3abc123def456.cloudfront.net",
        );

        assert_eq!(
            site.resolved_url(&bindings).unwrap(),
            "https://d3abc123def456.cloudfront.net"
        );
    }

    #[test]
    fn test_should_name_missing_attribute_when_resolution_fails() {
        let site = site();
        let message = site
            .resolved_url(&AttributeBindings::new())
            .unwrap_err()
            .to_string();

        assert!(message.contains("SiteDistribution"), "got: {message}");
        assert!(message.contains("DomainName"), "got: {message}");
    }

    #[test]
    fn test_should_ignore_unrelated_bindings_when_resolving() {
        let site = site();
        let mut bindings = AttributeBindings::new();
        bindings.bind_physical_id(site.bucket_id().clone(), "webapp-sitebucket-1f8a");
        bindings.bind_attribute(site.bucket_id().clone(), "Arn", "arn:aws:s3:::site");

        assert!(site.resolved_url(&bindings).is_err());
    }
}
