use backup_tree::config::NamingConfig;
use backup_tree::naming::{insert_token, preview_pattern, translate_pattern, NamingContext, AVAILABLE_TOKENS};
use chrono::{FixedOffset, TimeZone, Utc};

#[test]
fn default_preview_matches_editor_placeholder() {
    let now = Utc.with_ymd_and_hms(2025, 12, 22, 14, 30, 0).unwrap();
    let ctx = NamingConfig::default().preview_context();
    let preview = preview_pattern("backup-{YYYY}-{MM}-{DD}_{HH}-{mm}-{SS}", &ctx, &now);
    assert_eq!(preview, "backup-2025-12-22_14-30-00");
}

#[test]
fn server_tokens_use_preview_values() {
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let ctx = NamingConfig::default().preview_context();
    let preview = preview_pattern("{SERVER_NAME}_{SERVER_HOST}_{profile}", &ctx, &now);
    assert_eq!(preview, "my-server_192.168.1.100_my_database");
}

#[test]
fn time_tokens_follow_the_given_offset() {
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2025, 6, 1, 23, 5, 9).unwrap();
    let out = translate_pattern("{date}T{time}", &NamingContext::default(), &now);
    assert_eq!(out, "2025-06-01T23-05-09");
}

#[test]
fn every_catalogue_token_is_translated() {
    let now = Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap();
    let ctx = NamingContext {
        server_name: "srv".to_string(),
        server_host: "10.0.0.1".to_string(),
        profile_name: "prod".to_string(),
    };
    let pattern = AVAILABLE_TOKENS
        .iter()
        .flat_map(|g| g.tokens.iter())
        .fold(String::new(), |acc, token| insert_token(&acc, token));
    let out = translate_pattern(&pattern, &ctx, &now);
    assert!(!out.contains('{'), "untranslated token in {}", out);
}
