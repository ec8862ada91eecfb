//! Destructive teardown flags on the storage resource.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::template_json;

    #[test]
    fn test_should_mark_bucket_for_deletion_on_teardown() {
        let json = template_json();
        let bucket = &json["Resources"]["SiteBucket"];
        assert_eq!(bucket["DeletionPolicy"], json!("Delete"));
        assert_eq!(bucket["UpdateReplacePolicy"], json!("Delete"));
    }

    #[test]
    fn test_should_flag_bucket_contents_for_auto_deletion() {
        let json = template_json();
        assert_eq!(
            json["Resources"]["SiteBucket"]["Metadata"],
            json!({ "AutoDeleteObjects": true })
        );
    }

    #[test]
    fn test_should_version_the_bucket() {
        let json = template_json();
        assert_eq!(
            json["Resources"]["SiteBucket"]["Properties"]["VersioningConfiguration"]["Status"],
            json!("Enabled")
        );
    }

    #[test]
    fn test_should_keep_other_resources_free_of_removal_policies() {
        let json = template_json();
        for id in ["SiteOriginIdentity", "SiteBucketPolicy", "SiteDistribution"] {
            let resource = &json["Resources"][id];
            assert!(resource.get("DeletionPolicy").is_none(), "{id}");
            assert!(resource.get("UpdateReplacePolicy").is_none(), "{id}");
            assert!(resource.get("Metadata").is_none(), "{id}");
        }
    }
}
