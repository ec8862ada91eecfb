//! Determinism and idempotence of template synthesis.

#[cfg(test)]
mod tests {
    use edgestack_site::StaticSiteProps;

    use crate::{site, site_with};

    #[test]
    fn test_should_synthesize_byte_identical_json_across_evaluations() {
        let first = site().to_template().to_json().unwrap();
        let second = site().to_template().to_json().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_synthesize_byte_identical_pretty_json() {
        let first = site().to_template().to_json_pretty().unwrap();
        let second = site().to_template().to_json_pretty().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_stay_idempotent_with_custom_props() {
        let props = || {
            StaticSiteProps::builder()
                .oai_comment("site assets reader".to_owned())
                .bucket_name(Some("webapp-site-assets".to_owned()))
                .build()
        };
        assert_eq!(
            site_with(props()).to_template().to_json().unwrap(),
            site_with(props()).to_template().to_json().unwrap()
        );
    }

    #[test]
    fn test_should_carry_template_format_version() {
        let template = site().to_template();
        assert_eq!(template.format_version(), "2010-09-09");

        let json = crate::template_json();
        assert_eq!(json["AWSTemplateFormatVersion"], "2010-09-09");
    }

    #[test]
    fn test_should_render_same_content_compact_and_pretty() {
        let template = site().to_template();
        let compact: serde_json::Value =
            serde_json::from_str(&template.to_json().unwrap()).unwrap();
        let pretty: serde_json::Value =
            serde_json::from_str(&template.to_json_pretty().unwrap()).unwrap();
        assert_eq!(compact, pretty);
    }
}
