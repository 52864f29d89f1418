//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::borrow::Cow;

    use abshtml::parsers::html::{apply_replacements, Replacement, ReplacementGroups};

    const THREE_ANCHORS: &str = r#"<a href="/a">1</a><a href="/a">2</a><a href="/a">3</a>"#;

    fn groups(replacements: Vec<Replacement>) -> ReplacementGroups {
        replacements.into_iter().collect()
    }

    #[test]
    fn skip_in_the_middle() {
        let groups = groups(vec![
            Replacement::rewrite("href", "/a", "https://ex.com/a"),
            Replacement::skip("href", "/a"),
            Replacement::rewrite("href", "/a", "https://ex.com/a"),
        ]);

        assert_eq!(
            apply_replacements(THREE_ANCHORS, &groups).unwrap(),
            r#"<a href="https://ex.com/a">1</a><a href="/a">2</a><a href="https://ex.com/a">3</a>"#
        );
    }

    #[test]
    fn skip_first() {
        let groups = groups(vec![
            Replacement::skip("href", "/a"),
            Replacement::rewrite("href", "/a", "https://ex.com/a"),
            Replacement::rewrite("href", "/a", "https://ex.com/a"),
        ]);

        assert_eq!(
            apply_replacements(THREE_ANCHORS, &groups).unwrap(),
            r#"<a href="/a">1</a><a href="https://ex.com/a">2</a><a href="https://ex.com/a">3</a>"#
        );
    }

    #[test]
    fn extra_matches_left_alone() {
        let groups = groups(vec![Replacement::rewrite("href", "/a", "https://ex.com/a")]);

        assert_eq!(
            apply_replacements(THREE_ANCHORS, &groups).unwrap(),
            r#"<a href="https://ex.com/a">1</a><a href="/a">2</a><a href="/a">3</a>"#
        );
    }

    #[test]
    fn extra_records_are_inert() {
        let groups = groups(vec![
            Replacement::rewrite("href", "/b", "https://ex.com/b"),
            Replacement::rewrite("href", "/b", "https://ex.com/b"),
        ]);

        assert_eq!(
            apply_replacements(r#"<a href="/b">b</a>"#, &groups).unwrap(),
            r#"<a href="https://ex.com/b">b</a>"#
        );
    }

    #[test]
    fn quote_style_and_name_case_kept() {
        let groups = groups(vec![
            Replacement::rewrite("href", "/a", "https://ex.com/a"),
            Replacement::rewrite("href", "/a", "https://ex.com/a"),
        ]);

        assert_eq!(
            apply_replacements(r#"<a href='/a'>1</a><a HREF="/a">2</a>"#, &groups).unwrap(),
            r#"<a href='https://ex.com/a'>1</a><a HREF="https://ex.com/a">2</a>"#
        );
    }

    #[test]
    fn text_outside_tags_untouched() {
        let groups = groups(vec![Replacement::rewrite("href", "/a", "https://ex.com/a")]);

        assert_eq!(
            apply_replacements(r#"<p>href="/a"</p><a href="/a">a</a>"#, &groups).unwrap(),
            r#"<p>href="/a"</p><a href="https://ex.com/a">a</a>"#
        );
    }

    #[test]
    fn value_with_pattern_metacharacters() {
        let groups = groups(vec![Replacement::rewrite(
            "href",
            "/a+b(1)?.html",
            "https://ex.com/a+b(1)?.html",
        )]);

        assert_eq!(
            apply_replacements(r#"<a href="/a+b(1)?.html">x</a>"#, &groups).unwrap(),
            r#"<a href="https://ex.com/a+b(1)?.html">x</a>"#
        );
    }

    #[test]
    fn groups_applied_in_order() {
        let groups = groups(vec![
            Replacement::rewrite("href", "/a", "https://ex.com/a"),
            Replacement::rewrite("src", "/i.png", "https://ex.com/i.png"),
        ]);

        assert_eq!(
            apply_replacements(r#"<a href="/a"><img src="/i.png"></a>"#, &groups).unwrap(),
            r#"<a href="https://ex.com/a"><img src="https://ex.com/i.png"></a>"#
        );
    }

    #[test]
    fn skip_only_group_borrows() {
        let groups = groups(vec![Replacement::skip("href", "/a")]);
        let result = apply_replacements(THREE_ANCHORS, &groups).unwrap();

        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn no_groups_borrows() {
        let result = apply_replacements(THREE_ANCHORS, &ReplacementGroups::default()).unwrap();

        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, THREE_ANCHORS);
    }
}
