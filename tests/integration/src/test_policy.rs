//! The read-only access binding between the distribution identity and the
//! bucket.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use edgestack_site::StaticSiteProps;

    use crate::{site_with, template_json};

    fn statement() -> serde_json::Value {
        template_json()["Resources"]["SiteBucketPolicy"]["Properties"]["PolicyDocument"]
            ["Statement"][0]
            .clone()
    }

    #[test]
    fn test_should_attach_exactly_one_statement() {
        let json = template_json();
        let statements = &json["Resources"]["SiteBucketPolicy"]["Properties"]["PolicyDocument"]
            ["Statement"];
        assert_eq!(statements.as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_should_grant_read_only_object_access() {
        let statement = statement();
        assert_eq!(statement["Effect"], json!("Allow"));
        assert_eq!(statement["Action"], json!("s3:GetObject"));
    }

    #[test]
    fn test_should_scope_grant_to_objects_of_the_origin_bucket() {
        assert_eq!(
            statement()["Resource"],
            json!({
                "Fn::Join": ["", [{ "Fn::GetAtt": ["SiteBucket", "Arn"] }, "/*"]]
            })
        );

        // The origin fetches from that same bucket.
        let json = template_json();
        let origin = &json["Resources"]["SiteDistribution"]["Properties"]["DistributionConfig"]
            ["Origins"][0];
        assert_eq!(
            origin["DomainName"],
            json!({ "Fn::GetAtt": ["SiteBucket", "RegionalDomainName"] })
        );
    }

    #[test]
    fn test_should_embed_identity_id_token_in_principal() {
        assert_eq!(
            statement()["Principal"]["AWS"],
            json!({
                "Fn::Join": [
                    "",
                    [
                        "arn:aws:iam::cloudfront:user/CloudFront Origin Access Identity ",
                        { "Ref": "SiteOriginIdentity" }
                    ]
                ]
            })
        );
    }

    #[test]
    fn test_should_carry_policy_version_and_bucket_ref() {
        let json = template_json();
        let properties = &json["Resources"]["SiteBucketPolicy"]["Properties"];
        assert_eq!(properties["PolicyDocument"]["Version"], json!("2012-10-17"));
        assert_eq!(properties["Bucket"], json!({ "Ref": "SiteBucket" }));
    }

    #[test]
    fn test_should_tie_principal_to_identity_id_not_comment() {
        let site = site_with(
            StaticSiteProps::builder()
                .oai_comment("site assets reader".to_owned())
                .build(),
        );
        let rendered = site.to_template().to_json().unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(
            json["Resources"]["SiteOriginIdentity"]["Properties"]
                ["CloudFrontOriginAccessIdentityConfig"]["Comment"],
            json!("site assets reader")
        );
        // Changing the comment leaves the principal untouched: it embeds
        // the identity's id, never its comment.
        assert_eq!(
            json["Resources"]["SiteBucketPolicy"]["Properties"]["PolicyDocument"]["Statement"][0]
                ["Principal"]["AWS"]["Fn::Join"][1][1],
            json!({ "Ref": "SiteOriginIdentity" })
        );
    }
}
