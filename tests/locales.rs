use std::collections::BTreeSet;

use regex::Regex;
use serde_yaml::Value;

const LANGUAGES: &[&str] = &["en", "zh-CN"];

fn placeholders(re: &Regex, text: &str) -> BTreeSet<String> {
    re.captures_iter(text).map(|c| c[1].to_string()).collect()
}

#[test]
fn every_key_has_both_languages_with_matching_placeholders() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/locales/app.yml");
    let raw = std::fs::read_to_string(path).unwrap();
    let doc: Value = serde_yaml::from_str(&raw).unwrap();
    let map = doc.as_mapping().unwrap();
    let re = Regex::new(r"%\{(\w+)\}").unwrap();

    let mut keys = 0;
    for (key, value) in map {
        let key = key.as_str().unwrap();
        if key == "_version" {
            continue;
        }
        keys += 1;
        let texts: Vec<&str> = LANGUAGES
            .iter()
            .map(|lang| {
                value
                    .get(*lang)
                    .and_then(Value::as_str)
                    .unwrap_or_else(|| panic!("{key} has no {lang} text"))
            })
            .collect();
        assert!(texts.iter().all(|t| !t.trim().is_empty()), "{key} is blank");
        assert_eq!(
            placeholders(&re, texts[0]),
            placeholders(&re, texts[1]),
            "{key} placeholders differ"
        );
    }
    assert!(keys > 20);
}
