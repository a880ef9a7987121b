//! End-to-end CLI test suite.
//!
//! Tests organized by command group. Each test verifies CLI behavior
//! through the public interface.

mod common;

use common::harness::TestEnv;
use lexicon::store::PageRepository;
use predicates::prelude::*;
use serde_json::Value;

// ===========================================
// save command tests
// ===========================================
mod save_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_save_creates_page() {
        let env = TestEnv::new();

        env.cmd()
            .save("Dragons", "Dragons breathe fire.")
            .assert()
            .success()
            .stdout(predicate::str::contains("Created page 'dragons'"));

        let store = env.store();
        let page = store.get_page_by_slug("dragons").unwrap();
        assert_eq!(page.title(), "Dragons");
    }

    #[test]
    fn test_save_twice_updates() {
        let env = TestEnv::new();
        env.save("dragons", "v1");

        env.cmd()
            .save("dragons", "v2")
            .assert()
            .success()
            .stdout(predicate::str::contains("Updated page 'dragons'"));

        let store = env.store();
        let page = store.get_page_by_slug("dragons").unwrap();
        assert_eq!(store.revision_count(page.id()).unwrap(), 2);
    }

    #[test]
    fn test_save_keeps_title_without_flag() {
        let env = TestEnv::new();
        env.cmd()
            .save("dragons", "v1")
            .args(["--title", "Of Dragons"])
            .assert()
            .success();
        env.save("dragons", "v2");

        let page = env.store().get_page_by_slug("dragons").unwrap();
        assert_eq!(page.title(), "Of Dragons");
    }

    #[test]
    fn test_save_from_file() {
        let env = TestEnv::new();
        let file = env.write_file("fire.md", "# Fire\n\nHot.");

        env.cmd()
            .args(["save", "fire", "--file"])
            .args([file.to_string_lossy()])
            .assert()
            .success();

        let store = env.store();
        let page = store.get_page_by_slug("fire").unwrap();
        assert_eq!(
            store.current_revision(page.id()).unwrap().content(),
            "# Fire\n\nHot."
        );
    }

    #[test]
    fn test_save_reports_new_phantoms() {
        let env = TestEnv::new();

        env.cmd()
            .save("dragons", "They hoard [[Gold]] and fear [[Knights|knights]].")
            .assert()
            .success()
            .stdout(predicate::str::contains("new phantom: gold"))
            .stdout(predicate::str::contains("new phantom: knights"));
    }

    #[test]
    fn test_save_json_output() {
        let env = TestEnv::new();

        let output: Value = env
            .cmd()
            .save("dragons", "See [[Fire]].")
            .format_json()
            .output_json();

        assert_eq!(output["data"]["created"], true);
        assert_eq!(output["data"]["page"]["slug"], "dragons");
        assert_eq!(output["data"]["phantoms"]["created"][0], "fire");
    }

    #[test]
    fn test_save_unsluggable_name_fails() {
        let env = TestEnv::new();

        env.cmd()
            .save("日本語", "content")
            .assert()
            .failure()
            .stderr(predicate::str::contains("slug"));
    }

    #[test]
    fn test_save_records_author() {
        let env = TestEnv::new();
        env.cmd()
            .save("dragons", "body")
            .args(["--author", "42"])
            .assert()
            .success();

        let store = env.store();
        let page = store.get_page_by_slug("dragons").unwrap();
        assert_eq!(
            store.current_revision(page.id()).unwrap().author().get(),
            42
        );
    }
}

// ===========================================
// show command tests
// ===========================================
mod show_tests {
    use super::*;

    #[test]
    fn test_show_renders_links_by_state() {
        let env = TestEnv::new();
        env.save("dragons", "Dragons breathe [[Fire]] and fear [[Knights]].");
        env.save("knights", "Armored.");

        env.cmd()
            .show("dragons")
            .assert()
            .success()
            .stdout(predicate::str::contains(
                r#"<a href="/fire" class="wiki-link phantom">Fire</a>"#,
            ))
            .stdout(predicate::str::contains(
                r#"<a href="/knights" class="wiki-link">Knights</a>"#,
            ));
    }

    #[test]
    fn test_show_escapes_raw_html() {
        let env = TestEnv::new();
        env.save("xss", "<script>alert(1)</script>");

        env.cmd()
            .show("xss")
            .assert()
            .success()
            .stdout(predicate::str::contains("&lt;script&gt;"))
            .stdout(predicate::str::contains("<script>").not());
    }

    #[test]
    fn test_show_raw_prints_markup() {
        let env = TestEnv::new();
        env.save("dragons", "See [[Fire]].");

        env.cmd()
            .args(["show", "dragons", "--raw"])
            .assert()
            .success()
            .stdout("See [[Fire]].");
    }

    #[test]
    fn test_show_missing_page_fails() {
        let env = TestEnv::new();

        env.cmd()
            .show("nowhere")
            .assert()
            .failure()
            .stderr(predicate::str::contains("page not found: nowhere"));
    }

    #[test]
    fn test_show_phantom_fails() {
        let env = TestEnv::new();
        env.save("dragons", "[[Fire]]");

        env.cmd()
            .show("fire")
            .assert()
            .failure()
            .stderr(predicate::str::contains("not been written"));
    }
}

// ===========================================
// history and revision command tests
// ===========================================
mod history_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_history_lists_newest_first() {
        let env = TestEnv::new();
        env.save("dragons", "first draft");
        env.save("dragons", "second draft");

        let output = env.cmd().args(["history", "dragons"]).output_success();

        let second = output.find("second draft").expect("second listed");
        let first = output.find("first draft").expect("first listed");
        assert!(second < first);
    }

    #[test]
    fn test_history_json() {
        let env = TestEnv::new();
        env.save("dragons", "first draft");
        env.save("dragons", "second draft");

        let output: Value = env
            .cmd()
            .args(["history", "dragons"])
            .format_json()
            .output_json();

        let revisions = output["data"].as_array().unwrap();
        assert_eq!(revisions.len(), 2);
        assert_eq!(revisions[0]["content"], "second draft");
    }

    #[test]
    fn test_revision_prints_content() {
        let env = TestEnv::new();
        env.save("dragons", "first draft");
        let id = {
            let store = env.store();
            let page = store.get_page_by_slug("dragons").unwrap();
            store.current_revision(page.id()).unwrap().id()
        };

        env.cmd()
            .args(["revision", &id.to_string()])
            .assert()
            .success()
            .stdout("first draft");
    }

    #[test]
    fn test_revision_missing_fails() {
        let env = TestEnv::new();

        env.cmd()
            .args(["revision", "999"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("revision not found: 999"));
    }
}

// ===========================================
// listing command tests
// ===========================================
mod listing_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ls_empty() {
        let env = TestEnv::new();

        env.cmd()
            .ls()
            .assert()
            .success()
            .stdout(predicate::str::contains("No pages found."));
    }

    #[test]
    fn test_ls_alphabetical_json() {
        let env = TestEnv::new();
        env.save("Zebra", "z");
        env.save("Apple", "a [[Kiwi]]");

        let output: Value = env.cmd().ls().format_json().output_json();

        let slugs: Vec<_> = output["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|page| page["slug"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(slugs, vec!["apple", "zebra"]);
    }

    #[test]
    fn test_phantoms_show_citation() {
        let env = TestEnv::new();
        env.cmd()
            .save("bestiary", "[[Wyvern]]")
            .args(["--author", "5"])
            .assert()
            .success();

        env.cmd()
            .phantoms()
            .assert()
            .success()
            .stdout(predicate::str::contains("wyvern"))
            .stdout(predicate::str::contains("cited in bestiary by user 5"));
    }

    #[test]
    fn test_phantom_provenance_survives_recitation() {
        let env = TestEnv::new();
        env.cmd()
            .save("first", "[[Unwritten Topic]]")
            .args(["--author", "1"])
            .assert()
            .success();
        env.cmd()
            .save("second", "[[Unwritten Topic]]")
            .args(["--author", "2"])
            .assert()
            .success();

        let output: Value = env.cmd().phantoms().format_json().output_json();

        let phantoms = output["data"].as_array().unwrap();
        assert_eq!(phantoms.len(), 1);
        assert_eq!(phantoms[0]["page"]["slug"], "unwritten-topic");
        assert_eq!(phantoms[0]["page"]["first_cited_by"], 1);
        assert_eq!(phantoms[0]["source_slug"], "first");
    }

    #[test]
    fn test_recent_limit() {
        let env = TestEnv::new();
        env.save("one", "1");
        env.save("two", "2");
        env.save("three", "3");

        let output: Value = env
            .cmd()
            .args(["recent", "-n", "2"])
            .format_json()
            .output_json();

        assert_eq!(output["data"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_stats() {
        let env = TestEnv::new();
        env.save("dragons", "[[Fire]] [[Ice]]");

        env.cmd()
            .args(["stats"])
            .assert()
            .success()
            .stdout(predicate::str::contains("1 pages, 2 phantoms"));
    }
}

// ===========================================
// search command tests
// ===========================================
mod search_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn env_with_pages() -> TestEnv {
        let env = TestEnv::new();
        env.save("wyrms", "Dragons of the northern peaks.");
        env.save("rivers", "Water flows to the sea.");
        env
    }

    #[test]
    fn test_search_stemming() {
        let env = env_with_pages();

        env.cmd()
            .search("dragon")
            .assert()
            .success()
            .stdout(predicate::str::contains("(wyrms)"))
            .stdout(predicate::str::contains("[Dragons]"))
            .stdout(predicate::str::contains("1 result(s)"));
    }

    #[test]
    fn test_search_prefix() {
        let env = env_with_pages();

        let output: Value = env.cmd().search("drag*").format_json().output_json();

        assert_eq!(output["data"][0]["slug"], "wyrms");
        assert!(
            output["data"][0]["snippet"]
                .as_str()
                .unwrap()
                .contains("<mark>")
        );
    }

    #[test]
    fn test_search_no_results() {
        let env = env_with_pages();

        env.cmd()
            .search("nonexistent-term")
            .assert()
            .success()
            .stdout(predicate::str::contains("No matching pages found."));
    }

    #[test]
    fn test_search_skips_deleted() {
        let env = env_with_pages();
        env.cmd().args(["delete", "wyrms"]).assert().success();

        env.cmd()
            .search("dragon")
            .assert()
            .success()
            .stdout(predicate::str::contains("No matching pages found."));
    }

    #[test]
    fn test_search_limit_from_config() {
        let env = TestEnv::new();
        env.write_config("search_limit = 1\n");
        env.save("fire-one", "fire");
        env.save("fire-two", "fire");

        let output: Value = env.cmd().search("fire").format_json().output_json();

        assert_eq!(output["data"].as_array().unwrap().len(), 1);
    }
}

// ===========================================
// delete / restore command tests
// ===========================================
mod delete_tests {
    use super::*;

    #[test]
    fn test_delete_and_restore() {
        let env = TestEnv::new();
        env.save("dragons", "Dragons fly.");

        env.cmd()
            .args(["delete", "dragons"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted page 'dragons'"));
        env.cmd()
            .args(["deleted"])
            .assert()
            .success()
            .stdout(predicate::str::contains("dragons"));
        env.cmd().show("dragons").assert().failure();

        env.cmd()
            .args(["restore", "dragons"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Restored page 'dragons'"));
        env.cmd()
            .search("fly")
            .assert()
            .success()
            .stdout(predicate::str::contains("(dragons)"));
    }

    #[test]
    fn test_restore_live_page_fails() {
        let env = TestEnv::new();
        env.save("dragons", "Dragons fly.");

        env.cmd()
            .args(["restore", "dragons"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }

    #[test]
    fn test_save_over_deleted_page_fails() {
        let env = TestEnv::new();
        env.save("dragons", "v1");
        env.cmd().args(["delete", "dragons"]).assert().success();

        env.cmd()
            .save("dragons", "v2")
            .assert()
            .failure()
            .stderr(predicate::str::contains("page already exists: dragons"));
    }

    #[test]
    fn test_deleted_page_links_render_as_phantom() {
        let env = TestEnv::new();
        env.save("knights", "Armored.");
        env.save("dragons", "They fear [[Knights]].");
        env.cmd().args(["delete", "knights"]).assert().success();

        env.cmd()
            .show("dragons")
            .assert()
            .success()
            .stdout(predicate::str::contains("wiki-link phantom"));
    }
}

// ===========================================
// links and slug command tests
// ===========================================
mod links_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_links_from_stdin() {
        let env = TestEnv::new();

        env.cmd()
            .args(["links"])
            .stdin("See [[Page Name|Display]] and `[[Not A Link]]`.\n[[Other]]")
            .assert()
            .success()
            .stdout("page-name  \"Display\"\nother  \"Other\"\n");
    }

    #[test]
    fn test_links_json() {
        let env = TestEnv::new();
        let file = env.write_file("page.md", "[[Fire|flames]] [[]] [[Unclosed");

        let output: Value = env
            .cmd()
            .args(["links"])
            .args([file.to_string_lossy()])
            .format_json()
            .output_json();

        assert_eq!(
            output["data"],
            serde_json::json!([{ "target": "fire", "display_text": "flames" }])
        );
    }

    #[test]
    fn test_slug() {
        let env = TestEnv::new();

        env.cmd()
            .args(["slug", "  Multiple   Spaces "])
            .assert()
            .success()
            .stdout("multiple-spaces\n");
        env.cmd()
            .args(["slug", "Café"])
            .assert()
            .success()
            .stdout("cafe\n");
    }
}

// ===========================================
// comment command tests
// ===========================================
mod comment_tests {
    use super::*;

    #[test]
    fn test_comment_round_trip() {
        let env = TestEnv::new();
        env.save("dragons", "body");

        env.cmd()
            .args(["comment", "dragons", "Needs sources", "--author", "3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Added comment"));

        env.cmd()
            .args(["comments", "dragons"])
            .assert()
            .success()
            .stdout(predicate::str::contains("user 3"))
            .stdout(predicate::str::contains("  Needs sources"));
    }

    #[test]
    fn test_empty_comment_fails() {
        let env = TestEnv::new();
        env.save("dragons", "body");

        env.cmd()
            .args(["comment", "dragons", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("comment cannot be empty"));
    }
}

// ===========================================
// configuration tests
// ===========================================
mod config_tests {
    use super::*;

    #[test]
    fn test_config_database_is_used() {
        let env = TestEnv::new();
        let db = env.root().join("configured.db");
        env.write_config(&format!("database = {:?}\n", db.to_string_lossy()));

        env.bare_cmd().save("dragons", "body").assert().success();

        assert!(db.exists());
    }

    #[test]
    fn test_invalid_config_is_reported() {
        let env = TestEnv::new();
        env.write_config("search_limit = \"lots\"");

        env.cmd()
            .ls()
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse config file"));
    }

    #[test]
    fn test_verbose_logs_to_stderr() {
        let env = TestEnv::new();

        env.cmd()
            .save("dragons", "[[Fire]]")
            .args(["-v"])
            .assert()
            .success()
            .stderr(predicate::str::contains("phantom page created"));
    }
}
