//! Integration tests for transform hooks and merge-field substitution.

use confstack::Configuration;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use tempfile::TempDir;

fn configuration_in(dir: &TempDir) -> Configuration {
    let mut conf = Configuration::new();
    conf.set_directory(dir.path());
    conf
}

fn write_file(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).expect("failed to write fixture");
}

fn subs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

mod pre_parsers {
    use super::*;

    #[test]
    fn matching_text_is_rewritten_before_decoding() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "test: fail\n");
        conf.register_pre_parser("(?i)fail", |matches, text| {
            let mut out = text.to_string();
            for m in matches.iter().rev() {
                out.replace_range(m.start()..m.end(), "pass");
            }
            out
        })
        .unwrap();

        assert_eq!(conf.get("app:test").unwrap(), json!("pass"));
    }

    #[test]
    fn non_matching_text_is_left_alone() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "test: ok\n");
        conf.register_pre_parser("(?i)fail", |_, text| text.replace("ok", "rewritten"))
            .unwrap();

        assert_eq!(conf.get("app:test").unwrap(), json!("ok"));
    }

    #[test]
    fn later_pre_parsers_see_earlier_output() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "stage: alpha\n");
        conf.register_pre_parser("alpha", |_, text| text.replace("alpha", "beta"))
            .unwrap();
        conf.register_pre_parser("beta", |_, text| text.replace("beta", "final"))
            .unwrap();

        assert_eq!(conf.get("app:stage").unwrap(), json!("final"));
    }

    #[test]
    fn reregistering_a_pattern_replaces_the_hook() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "test: fail\n");
        conf.register_pre_parser("fail", |_, text| text.replace("fail", "first"))
            .unwrap();
        conf.register_pre_parser("fail", |_, text| text.replace("fail", "second"))
            .unwrap();

        assert_eq!(conf.get("app:test").unwrap(), json!("second"));
    }
}

mod post_parsers {
    use super::*;

    #[test]
    fn decoded_values_are_rewritten() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "name: My App\n");
        conf.register_post_parser(|mut value| {
            value["stamped"] = json!(true);
            value
        });

        assert_eq!(conf.get("app:stamped").unwrap(), json!(true));
        assert_eq!(conf.get("app:name").unwrap(), json!("My App"));
    }

    #[test]
    fn post_parsers_run_in_registration_order() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "{}\n");
        conf.register_post_parser(|mut value| {
            value["order"] = json!(["first"]);
            value
        });
        conf.register_post_parser(|mut value| {
            value["order"]
                .as_array_mut()
                .expect("first hook ran")
                .push(json!("second"));
            value
        });

        assert_eq!(conf.get("app:order").unwrap(), json!(["first", "second"]));
    }
}

mod path_parsers {
    use super::*;

    #[test]
    fn stems_are_rewritten_before_file_resolution() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "test: true\n");
        conf.register_path_parser("^alias$", |_, _| "app".to_string())
            .unwrap();

        assert_eq!(conf.get("alias:test").unwrap(), json!(true));
        // The key sequence still comes from the original logical path
        assert_eq!(conf.file_stem("alias:test"), "app");
    }

    #[test]
    fn rewrites_compose_in_registration_order() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "archive-app.yml", "kept: true\n");
        conf.register_path_parser("^legacy-", |caps, stem| {
            stem.replacen(&caps[0], "old-", 1)
        })
        .unwrap();
        conf.register_path_parser("^old-", |caps, stem| {
            stem.replacen(&caps[0], "archive-", 1)
        })
        .unwrap();

        assert_eq!(conf.get("legacy-app:kept").unwrap(), json!(true));
    }

    #[test]
    fn invalid_patterns_are_rejected_at_registration() {
        let mut conf = Configuration::new();
        let err = conf
            .register_path_parser("(unclosed", |_, stem| stem.to_string())
            .unwrap_err();
        assert!(err.to_string().contains("Invalid pattern"));
    }
}

mod merge_fields {
    use super::*;

    #[test]
    fn only_supplied_merge_fields_are_replaced() {
        let dir = TempDir::new().unwrap();
        let conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "name: \"{name}\"\nlevel: \"{one}\"\n");

        let all = conf
            .load_with("app", &subs(&[("name", "Marcos")]))
            .unwrap();
        assert_eq!(all, json!({"name": "Marcos", "level": "{one}"}));
    }

    #[test]
    fn substitutions_apply_to_overlays_as_well() {
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        write_file(&dir, "app.yml", "name: base\n");
        write_file(&dir, "app.env1.yml", "name: \"{name}\"\n");
        conf.set_environments(["env1"]);

        let name = conf
            .get_with("app:name", &subs(&[("name", "Overlaid")]))
            .unwrap();
        assert_eq!(name, json!("Overlaid"));
    }

    #[test]
    fn a_cache_hit_ignores_freshly_supplied_substitutions() {
        // Observed source behavior, preserved deliberately: the cache is
        // keyed by stem alone, so the first load's substitutions stick.
        let dir = TempDir::new().unwrap();
        let mut conf = configuration_in(&dir);
        conf.set_cache(std::sync::Arc::new(confstack::RuntimeCache::new()));
        write_file(&dir, "app.yml", "name: \"{name}\"\n");

        let first = conf.get_with("app:name", &subs(&[("name", "Marcos")])).unwrap();
        assert_eq!(first, json!("Marcos"));

        let second = conf.get_with("app:name", &subs(&[("name", "Other")])).unwrap();
        assert_eq!(second, json!("Marcos"));
    }
}
