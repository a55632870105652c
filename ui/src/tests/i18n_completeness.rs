use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILE: &str = "reelscope_ui.ftl";
const FALLBACK: &str = "en";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn is_message_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Message ids defined at column zero. Indented lines belong to the value
/// above them; terms (`-brand`) and comments are not messages.
fn message_ids(ftl: &str) -> BTreeSet<String> {
    ftl.lines()
        .filter(|line| !line.starts_with([' ', '\t', '#', '-']))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| is_message_id(id))
        .map(str::to_string)
        .collect()
}

fn read_locale(tag: &str) -> String {
    let path = crate_root().join("i18n").join(tag).join(FTL_FILE);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("reading {}: {err}", path.display()))
}

fn rust_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            rust_sources(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Literal ids passed to `t!(tr, "id", ..)`. Lookups through
/// `Translator::get` take runtime ids and are not seen here.
fn literal_keys(source: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut rest = source;
    while let Some(pos) = rest.find("t!(") {
        let preceded_by_ident = rest[..pos]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        rest = &rest[pos + 3..];
        if preceded_by_ident {
            continue;
        }

        let Some((_, after_translator)) = rest.split_once(',') else {
            break;
        };
        let Some(literal) = after_translator.trim_start().strip_prefix('"') else {
            continue;
        };
        if let Some((key, _)) = literal.split_once('"') {
            if is_message_id(key) {
                keys.push(key.to_string());
            }
        }
    }
    keys
}

fn referenced_keys() -> BTreeSet<String> {
    let mut files = Vec::new();
    rust_sources(&crate_root().join("src"), &mut files);
    files
        .iter()
        .filter_map(|path| fs::read_to_string(path).ok())
        .flat_map(|source| literal_keys(&source))
        .collect()
}

fn other_locales() -> Vec<String> {
    let mut tags: Vec<String> = fs::read_dir(crate_root().join("i18n"))
        .into_iter()
        .flatten()
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|tag| tag != FALLBACK)
        .collect();
    tags.sort();
    tags
}

#[test]
fn scanner_reads_only_macro_literals() {
    let source = r#"
        let a = t!(tr, "nav-genres");
        let b = t!(tr, "decade-heading", decade = d);
        let c = format!("{}", x);
        let d = t!(self.tr(), dynamic_id);
    "#;
    assert_eq!(literal_keys(source), vec!["nav-genres", "decade-heading"]);
}

#[test]
fn source_keys_exist_in_fallback() {
    let defined = message_ids(&read_locale(FALLBACK));
    assert!(!defined.is_empty(), "fallback {FALLBACK}/{FTL_FILE} defines no messages");

    let referenced = referenced_keys();
    assert!(!referenced.is_empty(), "no t! call sites found under src/");

    let missing: Vec<&str> = referenced
        .iter()
        .filter(|key| !defined.contains(*key))
        .map(String::as_str)
        .collect();
    assert!(
        missing.is_empty(),
        "keys used in src/ but absent from {FALLBACK}/{FTL_FILE}:\n{}",
        missing.join("\n")
    );
}

#[test]
fn every_locale_covers_the_fallback() {
    let fallback = message_ids(&read_locale(FALLBACK));
    let locales = other_locales();
    assert!(!locales.is_empty(), "only the fallback locale is present");

    let mut report = String::new();
    for tag in &locales {
        let defined = message_ids(&read_locale(tag));
        let missing: Vec<&str> = fallback
            .difference(&defined)
            .map(String::as_str)
            .collect();
        if !missing.is_empty() {
            report.push_str(&format!("{tag}: {}\n", missing.join(", ")));
        }
    }
    assert!(report.is_empty(), "untranslated messages:\n{report}");
}
