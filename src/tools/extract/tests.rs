#[cfg(test)]
mod tests {
    use crate::tools::extract::utils::walk_payload;
    use crate::tools::extract::*;
    use serde_json::json;

    fn candidate(url: &str) -> ImageCandidate {
        ImageCandidate::new(url, None).unwrap()
    }

    fn urls(candidates: &[ImageCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.url()).collect()
    }

    #[test]
    fn test_floorplan_flag_from_alt() {
        let plan = ImageCandidate::new(
            "https://example.com/media/level-1.jpg",
            Some("Floor Plan - Level 1".to_string()),
        )
        .unwrap();
        assert!(plan.is_floorplan());

        let kitchen = ImageCandidate::new(
            "https://example.com/media/kitchen-1.jpg",
            Some("Kitchen".to_string()),
        )
        .unwrap();
        assert!(!kitchen.is_floorplan());
    }

    #[test]
    fn test_floorplan_flag_falls_back_to_url() {
        assert!(candidate("https://example.com/media/FloorPlan-2.png").is_floorplan());

        let blank_alt =
            ImageCandidate::new("https://example.com/media/blueprint.png", Some("  ".into()))
                .unwrap();
        assert!(blank_alt.is_floorplan());
    }

    #[test]
    fn test_blank_url_is_rejected() {
        assert!(ImageCandidate::new("", None).is_none());
        assert!(ImageCandidate::new("   ", Some("Kitchen".into())).is_none());
    }

    #[test]
    fn test_candidates_compare_by_url_only() {
        let a = ImageCandidate::new("https://example.com/a.jpg", Some("Kitchen".into())).unwrap();
        let b = candidate("https://example.com/a.jpg");
        assert_eq!(a, b);
        assert_ne!(a, candidate("https://example.com/a.jpg?w=2"));
    }

    #[test]
    fn test_negative_hint_vetoes_positive() {
        assert!(!is_likely_listing_image("https://x.com/photo-logo.png", None));
        assert!(!is_likely_listing_image(
            "https://x.com/photos/1.jpg",
            Some("Listing agent avatar")
        ));
    }

    #[test]
    fn test_positive_hint_from_url_or_alt() {
        assert!(is_likely_listing_image("https://x.com/gallery/1.jpg", None));
        assert!(is_likely_listing_image("https://x.com/a/123.jpg", Some("Gallery view")));
        assert!(!is_likely_listing_image("https://x.com/a/123.jpg", None));
    }

    #[test]
    fn test_redfin_cdn_rule_overrides_positive_hints() {
        assert!(is_likely_listing_image(
            "https://cdn-redfin.com/photo/bigphoto/123.jpg",
            None
        ));
        assert!(!is_likely_listing_image(
            "https://cdn-redfin.com/photo/images/footer/flags/1.jpg",
            None
        ));
        // "photo" is a positive hint, but the CDN rule wants /bigphoto/.
        assert!(!is_likely_listing_image(
            "https://cdn-redfin.com/photo/68/islphoto/123.jpg",
            None
        ));
    }

    #[test]
    fn test_dedupe_preserves_first_seen_order() {
        let list = vec![
            candidate("https://x.com/a.jpg"),
            candidate("https://x.com/b.jpg"),
            candidate("https://x.com/a.jpg"),
            candidate("https://x.com/c.jpg"),
        ];
        let once = dedupe(list);
        assert_eq!(
            urls(&once),
            vec!["https://x.com/a.jpg", "https://x.com/b.jpg", "https://x.com/c.jpg"]
        );

        let twice = dedupe(once.clone());
        assert_eq!(urls(&twice), urls(&once));
    }

    #[test]
    fn test_dedupe_keeps_first_alt() {
        let list = vec![
            ImageCandidate::new("https://x.com/a.jpg", Some("Kitchen".into())).unwrap(),
            ImageCandidate::new("https://x.com/a.jpg", Some("Floor plan".into())).unwrap(),
        ];
        let result = dedupe(list);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].alt(), Some("Kitchen"));
        assert!(!result[0].is_floorplan());
    }

    #[test]
    fn test_tag_scan_source_attribute_fallbacks() {
        let html = r#"
            <html>
                <body>
                    <img src="https://x.com/photos/1.jpg" data-src="https://x.com/photos/ignored.jpg">
                    <img src="" data-src="https://x.com/photos/2.jpg" alt="Living room">
                    <img data-lazy="https://x.com/photos/3.jpg">
                    <img alt="no source at all">
                </body>
            </html>
        "#;

        let images = extract_generic(html);
        assert_eq!(
            urls(&images[..3]),
            vec![
                "https://x.com/photos/1.jpg",
                "https://x.com/photos/2.jpg",
                "https://x.com/photos/3.jpg",
            ]
        );
        assert_eq!(images[1].alt(), Some("Living room"));
        assert_eq!(images[2].alt(), None);
    }

    #[test]
    fn test_tag_scan_drops_site_chrome() {
        let html = r#"
            <img src="https://x.com/static/brand-logo.png" alt="Brand">
            <img src="https://x.com/photos/4.jpg" alt="Company icon">
            <img src="https://x.com/listing/5.jpg" alt="Bedroom">
        "#;

        let images = extract_generic(html);
        // The alt veto only applies to the tag stage; the pattern stage sees the bare URL.
        assert_eq!(
            urls(&images),
            vec!["https://x.com/listing/5.jpg", "https://x.com/photos/4.jpg"]
        );
        assert_eq!(images[1].alt(), None);
    }

    #[test]
    fn test_tag_stage_wins_over_pattern_stage() {
        let html = r#"
            <div style="background-image:url(https://x.com/photos/hero.jpg)"></div>
            <img src="https://x.com/photos/hero.jpg" alt="Front exterior">
        "#;

        let images = extract_generic(html);
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].alt(), Some("Front exterior"));
    }

    #[test]
    fn test_tag_scan_reads_noscript_fallbacks() {
        let html = r#"
            <html>
                <body>
                    <img src="https://x.com/listing/1.jpg" alt="Front exterior">
                    <noscript><img src="https://x.com/listing/ns.gif" alt="Kitchen photo"></noscript>
                    <noscript><img src="https://x.com/listing/2.jpg" alt="Floor plan"></noscript>
                    <img src="https://x.com/listing/3.jpg" alt="Bedroom">
                </body>
            </html>
        "#;

        let images = extract_generic(html);
        assert_eq!(
            urls(&images),
            vec![
                "https://x.com/listing/1.jpg",
                "https://x.com/listing/ns.gif",
                "https://x.com/listing/2.jpg",
                "https://x.com/listing/3.jpg",
            ]
        );
        assert_eq!(images[1].alt(), Some("Kitchen photo"));
        assert_eq!(images[2].alt(), Some("Floor plan"));
        assert!(images[2].is_floorplan());
    }

    #[test]
    fn test_noscript_fallbacks_still_pass_the_relevance_filter() {
        let html = r#"
            <noscript><img src="https://x.com/assets/brand-logo.gif" alt="Brand"></noscript>
        "#;
        assert!(extract_generic(html).is_empty());
    }

    #[test]
    fn test_pattern_scan_finds_urls_outside_img_tags() {
        let html = r#"
            <script>window.gallery = {"hero":"https://x.com/photos/1.JPG?w=1024"};</script>
            <div data-bg='https://x.com/media/2.webp'></div>
        "#;

        let images = extract_generic(html);
        assert_eq!(
            urls(&images),
            vec!["https://x.com/photos/1.JPG?w=1024", "https://x.com/media/2.webp"]
        );
        assert!(images.iter().all(|c| c.alt().is_none()));
    }

    #[test]
    fn test_pattern_scan_ignores_other_extensions() {
        let html = r#"<script>var spinner = "https://x.com/photos/anim.gif";</script>"#;
        assert!(extract_generic(html).is_empty());
    }

    #[test]
    fn test_malformed_markup_still_scans() {
        let html = r#"<div><img src="https://x.com/listing/1.jpg" alt="Bedroom"><p><span></div></table>"#;
        let images = extract_generic(html);
        assert_eq!(urls(&images), vec!["https://x.com/listing/1.jpg"]);
    }

    #[test]
    fn test_empty_page_yields_no_candidates() {
        assert!(extract_generic("").is_empty());
        assert!(extract_specialized("").is_empty());
    }

    #[test]
    fn test_specialized_keeps_only_image_host() {
        let html = r#"
            <img src="https://photos.zillowstatic.com/fp/a-cc_ft_1536.jpg" alt="Kitchen">
            <img src="https://www.zillowstatic.com/static/logo.png" alt="Zillow">
        "#;

        let images = extract_specialized(html);
        assert_eq!(
            urls(&images),
            vec!["https://photos.zillowstatic.com/fp/a-cc_ft_1536.jpg"]
        );
        assert_eq!(images[0].alt(), Some("Kitchen"));
    }

    #[test]
    fn test_specialized_skips_relevance_filter() {
        let html = r#"
            <img src="https://photos.zillowstatic.com/fp/map-pin-1.jpg" alt="Agent photo">
            <script>var hero = "https://photos.zillowstatic.com/fp/agent-logo-2.jpg";</script>
        "#;

        let images = extract_specialized(html);
        assert_eq!(
            urls(&images),
            vec![
                "https://photos.zillowstatic.com/fp/map-pin-1.jpg",
                "https://photos.zillowstatic.com/fp/agent-logo-2.jpg",
            ]
        );
        assert_eq!(images[0].alt(), Some("Agent photo"));
        assert_eq!(images[1].alt(), None);

        // The same markup is site chrome to the generic filter.
        assert!(extract_generic(html).is_empty());
    }

    #[test]
    fn test_specialized_stage_order() {
        let html = r#"
            <html>
                <body>
                    <img src="https://photos.zillowstatic.com/fp/a.jpg" alt="Dining room">
                    <p>https://photos.zillowstatic.com/fp/b.jpg</p>
                    <script id="__NEXT_DATA__" type="application/json">
                        {"props": {"photos": [
                            {"url": "https:\/\/photos.zillowstatic.com\/fp\/c.jpg"},
                            {"url": "https:\/\/photos.zillowstatic.com\/fp\/a.jpg"}
                        ]}}
                    </script>
                </body>
            </html>
        "#;

        let images = extract_specialized(html);
        assert_eq!(
            urls(&images),
            vec![
                "https://photos.zillowstatic.com/fp/a.jpg",
                "https://photos.zillowstatic.com/fp/b.jpg",
                "https://photos.zillowstatic.com/fp/c.jpg",
            ]
        );
        assert_eq!(images[0].alt(), Some("Dining room"));
    }

    #[test]
    fn test_walker_recurses_past_non_matching_keys() {
        let payload = json!({
            "gallery": [
                {"imageUrl": "https://photos.zillowstatic.com/x.jpg"},
                {"other": 1}
            ]
        });

        let mut out = Vec::new();
        walk_payload(&payload, &ZILLOW, 0, &mut out);
        assert_eq!(urls(&out), vec!["https://photos.zillowstatic.com/x.jpg"]);
    }

    #[test]
    fn test_walker_key_and_host_rules() {
        let payload = json!({
            "URL": "https://photos.zillowstatic.com/upper.jpg",
            "image_url": "https://example.com/wrong-host.jpg",
            "caption": "https://photos.zillowstatic.com/not-a-url-field.jpg",
            "url": {"deep": {"Image_Url": "https://photos.zillowstatic.com/deep.jpg"}}
        });

        let mut out = Vec::new();
        walk_payload(&payload, &ZILLOW, 0, &mut out);
        assert_eq!(
            urls(&out),
            vec![
                "https://photos.zillowstatic.com/upper.jpg",
                "https://photos.zillowstatic.com/deep.jpg",
            ]
        );
    }

    #[test]
    fn test_walker_stops_at_depth_bound() {
        let mut payload = json!({"imageUrl": "https://photos.zillowstatic.com/bottom.jpg"});
        for _ in 0..200 {
            payload = json!({ "child": payload });
        }

        let mut out = Vec::new();
        walk_payload(&payload, &ZILLOW, 0, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_payload_does_not_abort() {
        let html = r#"
            <script id="__NEXT_DATA__" type="application/json">{"props": {not json</script>
            <img src="https://photos.zillowstatic.com/fp/1.jpg">
        "#;

        let images = extract_specialized(html);
        assert_eq!(urls(&images), vec!["https://photos.zillowstatic.com/fp/1.jpg"]);
    }

    #[test]
    fn test_policy_for_url() {
        assert_eq!(
            ExtractPolicy::for_url("https://www.zillow.com/homedetails/123_zpid/").name(),
            "zillow"
        );
        assert_eq!(ExtractPolicy::for_url("https://zillow.com/").name(), "zillow");
        assert_eq!(
            ExtractPolicy::for_url("https://www.redfin.com/CA/home/1").name(),
            "generic"
        );
        assert_eq!(ExtractPolicy::for_url("https://notzillow.com/").name(), "generic");
        assert_eq!(ExtractPolicy::for_url("not a url").name(), "generic");
    }
}
