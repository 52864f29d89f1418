//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use abshtml::{has_candidate_attributes, AbshtmlOptions};

    fn assets_only_options() -> AbshtmlOptions {
        AbshtmlOptions {
            assets_only: true,
            static_image_url_prefix: Some("/content/images/".to_string()),
            ..AbshtmlOptions::default()
        }
    }

    #[test]
    fn each_marker() {
        let options = AbshtmlOptions::default();

        assert!(has_candidate_attributes(r#"<a href="/">x</a>"#, &options).unwrap());
        assert!(has_candidate_attributes(r#"<img src="/a.png">"#, &options).unwrap());
        assert!(has_candidate_attributes(r#"<img srcset="/a.png 2x">"#, &options).unwrap());
    }

    #[test]
    fn plain_text() {
        assert!(!has_candidate_attributes("<p>href src srcset</p>", &AbshtmlOptions::default()).unwrap());
    }

    #[test]
    fn marker_is_literal() {
        let options = AbshtmlOptions::default();

        assert!(!has_candidate_attributes(r#"<a href = "/">x</a>"#, &options).unwrap());
        assert!(!has_candidate_attributes(r#"<a HREF="/">x</a>"#, &options).unwrap());
    }

    #[test]
    fn assets_only_looks_for_prefix() {
        let options = assets_only_options();

        assert!(has_candidate_attributes(r#"<img src="/content/images/a.png">"#, &options).unwrap());
        assert!(!has_candidate_attributes(r#"<a href="/about/">x</a>"#, &options).unwrap());
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use abshtml::{has_candidate_attributes, AbshtmlError, AbshtmlOptions};

    #[test]
    fn assets_only_without_prefix() {
        let options = AbshtmlOptions {
            assets_only: true,
            static_image_url_prefix: Some(String::new()),
            ..AbshtmlOptions::default()
        };

        assert!(matches!(
            has_candidate_attributes(r#"<img src="/a.png">"#, &options),
            Err(AbshtmlError::MissingStaticPrefix)
        ));
    }
}
