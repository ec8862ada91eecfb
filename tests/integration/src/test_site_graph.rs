//! Shape and ordering of the composed resource graph.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use edgestack_cloudfront::{
        Behavior, Distribution, DistributionProps, OriginAccessIdentity, S3OriginSource,
        SourceConfiguration,
    };
    use edgestack_core::{CoreError, LogicalId, Stack, StackName};
    use edgestack_iam::{Action, PolicyStatement, PolicyStatementProps, Principal};
    use edgestack_s3::{Bucket, BucketPolicy, BucketProps};

    use crate::{site, template_json};

    #[test]
    fn test_should_declare_exactly_four_resources() {
        assert_eq!(site().to_template().resource_count(), 4);
    }

    #[test]
    fn test_should_declare_one_resource_of_each_kind() {
        let json = template_json();
        let mut kinds: Vec<&str> = json["Resources"]
            .as_object()
            .unwrap()
            .values()
            .map(|resource| resource["Type"].as_str().unwrap())
            .collect();
        kinds.sort_unstable();
        assert_eq!(
            kinds,
            vec![
                "AWS::CloudFront::CloudFrontOriginAccessIdentity",
                "AWS::CloudFront::Distribution",
                "AWS::S3::Bucket",
                "AWS::S3::BucketPolicy",
            ]
        );
    }

    #[test]
    fn test_should_list_each_resource_once_in_creation_order() {
        let site = site();
        let order = site.stack().creation_order();
        let unique: BTreeSet<&LogicalId> = order.iter().copied().collect();

        assert_eq!(order.len(), 4);
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn test_should_order_dependencies_before_dependents() {
        let site = site();
        let order = site.stack().creation_order();
        let position = |id: &LogicalId| order.iter().position(|x| *x == id).unwrap();

        assert!(position(site.bucket_id()) < position(site.bucket_policy_id()));
        assert!(position(site.identity_id()) < position(site.bucket_policy_id()));
        assert!(position(site.bucket_id()) < position(site.distribution_id()));
        assert!(position(site.identity_id()) < position(site.distribution_id()));
    }

    #[test]
    fn test_should_record_depends_on_edges_in_template() {
        let template = site().to_template();
        let edges = |id: &str| -> Vec<String> {
            template
                .resource(id)
                .unwrap()
                .depends_on()
                .iter()
                .map(ToString::to_string)
                .collect()
        };

        assert!(edges("SiteBucket").is_empty());
        assert!(edges("SiteOriginIdentity").is_empty());
        assert_eq!(edges("SiteBucketPolicy"), vec!["SiteBucket", "SiteOriginIdentity"]);
        assert_eq!(edges("SiteDistribution"), vec!["SiteBucket", "SiteOriginIdentity"]);
    }

    #[test]
    fn test_should_reject_policy_added_before_its_bucket() {
        let mut bucket =
            Bucket::new(LogicalId::new("OrphanBucket").unwrap(), BucketProps::default()).unwrap();
        bucket
            .add_to_resource_policy(
                PolicyStatement::new(
                    PolicyStatementProps::builder()
                        .actions(vec![Action::new("s3:GetObject").unwrap()])
                        .resources(vec![bucket.arn_for_objects()])
                        .principals(vec![Principal::arn("arn:aws:iam::123:user/reader")])
                        .build(),
                )
                .unwrap(),
            )
            .unwrap();
        let policy =
            BucketPolicy::for_bucket(LogicalId::new("OrphanPolicy").unwrap(), &bucket).unwrap();

        let mut stack = Stack::new(StackName::new("webapp").unwrap());
        let err = stack.add_resource(&policy).unwrap_err();
        assert!(matches!(err, CoreError::UnknownReference { .. }));
    }

    #[test]
    fn test_should_reject_distribution_added_before_its_origin() {
        let bucket =
            Bucket::new(LogicalId::new("SiteBucket").unwrap(), BucketProps::default()).unwrap();
        let identity = OriginAccessIdentity::new(
            LogicalId::new("SiteOriginIdentity").unwrap(),
            "OAI for accessing the S3 bucket",
        )
        .unwrap();
        let distribution = Distribution::new(
            LogicalId::new("SiteDistribution").unwrap(),
            DistributionProps::builder()
                .origin_configs(vec![SourceConfiguration::new(
                    S3OriginSource::new(&bucket, &identity),
                    vec![Behavior::default_behavior()],
                )])
                .build(),
        )
        .unwrap();

        let mut stack = Stack::new(StackName::new("webapp").unwrap());
        let err = stack.add_resource(&distribution).unwrap_err();
        assert!(matches!(err, CoreError::UnknownReference { .. }));
    }
}
