use std::path::{Path, PathBuf};

use super::*;

#[test]
fn parse_keeps_only_exec_command_token() {
    let raw = "[Desktop Entry]\nName=Zed\nExec=/home/me/appimages/Zed.AppImage --no-sandbox %U\nIcon=zed\n";
    let record = RegistrationRecord::parse(raw, "/tmp/zed.desktop");
    assert_eq!(record.executable_path, "/home/me/appimages/Zed.AppImage");
    assert_eq!(record.display_name, "Zed");
    assert_eq!(record.icon_reference, "zed");
    assert_eq!(record.record_path, PathBuf::from("/tmp/zed.desktop"));
}

#[test]
fn parse_first_occurrence_wins_for_duplicate_keys() {
    let raw = "Name=First\nExec=/a.AppImage\nName=Second\nExec=/b.AppImage\nIcon=one\nIcon=two\n";
    let record = RegistrationRecord::parse(raw, "/tmp/dup.desktop");
    assert_eq!(record.display_name, "First");
    assert_eq!(record.executable_path, "/a.AppImage");
    assert_eq!(record.icon_reference, "one");
}

#[test]
fn parse_first_occurrence_wins_even_when_empty() {
    let raw = "Name=\nName=Later\n";
    let record = RegistrationRecord::parse(raw, "/tmp/empty.desktop");
    assert_eq!(record.display_name, "");
}

#[test]
fn parse_ignores_localized_and_unknown_keys() {
    let raw = "Name[de]=Rechner\nGenericName=Calc\nName=Calculator\nTryExec=calc\n";
    let record = RegistrationRecord::parse(raw, "/tmp/calc.desktop");
    assert_eq!(record.display_name, "Calculator");
    assert!(record.executable_path.is_empty());
    assert!(record.icon_reference.is_empty());
}

#[test]
fn parse_trims_surrounding_whitespace_on_lines() {
    let raw = "   Exec=/opt/Tool.AppImage arg\r\n\tName=Tool  \r\n";
    let record = RegistrationRecord::parse(raw, "/tmp/tool.desktop");
    assert_eq!(record.executable_path, "/opt/Tool.AppImage");
    assert_eq!(record.display_name, "Tool");
}

#[test]
fn parse_of_unstructured_text_yields_default_record() {
    let record = RegistrationRecord::parse("not a desktop file at all", "/tmp/x.desktop");
    assert_eq!(
        record,
        RegistrationRecord {
            record_path: PathBuf::from("/tmp/x.desktop"),
            ..RegistrationRecord::default()
        }
    );
}

#[test]
fn managed_records_require_bundle_marker() {
    let managed = RegistrationRecord::parse("Exec=/home/me/appimages/Foo.AppImage\n", "/a");
    let foreign = RegistrationRecord::parse("Exec=/usr/bin/firefox %u\n", "/b");
    assert!(managed.is_managed());
    assert!(!foreign.is_managed());
}

#[test]
fn fallback_and_empty_icons_are_not_removable() {
    let mut record = RegistrationRecord::parse("Icon=application-x-executable\n", "/a");
    assert!(!record.has_removable_icon());
    record.icon_reference.clear();
    assert!(!record.has_removable_icon());
    record.icon_reference = "/home/me/.local/share/icons/foo.png".to_string();
    assert!(record.has_removable_icon());
}

#[test]
fn record_display_lists_every_field() {
    let record = RegistrationRecord::parse(
        "Name=Foo\nExec=/s/Foo.AppImage\nIcon=/i/foo.png\n",
        "/apps/Foo.desktop",
    );
    let dump = record.to_string();
    let lines = dump.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Name: Foo");
    assert_eq!(lines[1], "Exec: /s/Foo.AppImage");
    assert_eq!(lines[2], "Icon: /i/foo.png");
    assert_eq!(lines[3], "Desktop: /apps/Foo.desktop");
    assert_eq!(lines[4], format!("Id: {}", record.id()));
}

#[test]
fn record_id_is_stable_and_path_specific() {
    let first = RecordId::for_path(Path::new("/apps/Foo.desktop"));
    let again = RecordId::for_path(Path::new("/apps/Foo.desktop"));
    let other = RecordId::for_path(Path::new("/apps/Bar.desktop"));
    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(first.as_str().len(), 12);
    assert!(first.as_str().chars().all(|ch| ch.is_ascii_hexdigit()));
}

#[test]
fn record_id_matches_prefixes_of_minimum_length() {
    let id = RecordId::for_path(Path::new("/apps/Foo.desktop"));
    assert!(id.matches(id.as_str()));
    assert!(id.matches(&id.as_str()[..4]));
    assert!(id.matches(&id.as_str()[..6].to_ascii_uppercase()));
    assert!(!id.matches(&id.as_str()[..3]));
    assert!(!id.matches("zzzz"));
}

#[test]
fn bundle_derives_stored_path_and_base_name() {
    let bundle = Bundle::new("/downloads/Foo.AppImage", Path::new("/home/me/appimages"))
        .expect("must build bundle");
    assert_eq!(bundle.source_path(), Path::new("/downloads/Foo.AppImage"));
    assert_eq!(
        bundle.stored_path(),
        Path::new("/home/me/appimages/Foo.AppImage")
    );
    assert_eq!(bundle.base_name(), "Foo");
}

#[test]
fn bundle_base_name_strips_only_final_extension() {
    let bundle = Bundle::new("Tool-1.2.3-x86_64.AppImage", Path::new("/store"))
        .expect("must build bundle");
    assert_eq!(bundle.base_name(), "Tool-1.2.3-x86_64");
}

#[test]
fn bundle_without_file_name_is_not_found() {
    let err = Bundle::new("/", Path::new("/store")).expect_err("root has no file name");
    assert!(matches!(err, AppImgError::NotFound { .. }));
}

#[test]
fn fabricated_manifest_has_fixed_shape() {
    let text = fabricate_manifest(
        "Foo",
        Path::new("/store/Foo.AppImage"),
        FALLBACK_ICON,
    );
    assert_eq!(
        text,
        "[Desktop Entry]\nName=Foo\nExec=/store/Foo.AppImage\nIcon=application-x-executable\nType=Application\nCategories=Utility;\n"
    );
    for key in ["Name=", "Exec=", "Icon="] {
        assert_eq!(
            text.lines().filter(|line| line.starts_with(key)).count(),
            1,
            "expected exactly one {key} line"
        );
    }
}

#[test]
fn patch_rewrites_exec_and_icon_and_drops_exec_arguments() {
    let raw = "[Desktop Entry]\nName=Zed\nExec=zed --foreground %U\nIcon=zed\nType=Application";
    let patched = patch_manifest(raw, "Zed", Path::new("/store/Zed.AppImage"), "/icons/zed.png");
    assert_eq!(
        patched,
        "[Desktop Entry]\nName=Zed\nExec=/store/Zed.AppImage\nIcon=/icons/zed.png\nType=Application\n"
    );
}

#[test]
fn patch_normalizes_line_terminators() {
    let raw = "[Desktop Entry]\r\nName=Win\r\n\r\nComment=trailing";
    let patched = patch_manifest(raw, "Win", Path::new("/s/Win.AppImage"), FALLBACK_ICON);
    assert_eq!(patched, "[Desktop Entry]\nName=Win\n\nComment=trailing\n");
    assert!(!patched.contains('\r'));
}

#[test]
fn patch_rewrites_exec_lines_in_action_sections() {
    let raw = "[Desktop Entry]\nExec=app %U\n[Desktop Action new]\nExec=app --new-window\n";
    let patched = patch_manifest(raw, "App", Path::new("/s/App.AppImage"), FALLBACK_ICON);
    assert_eq!(
        patched
            .lines()
            .filter(|line| *line == "Exec=/s/App.AppImage")
            .count(),
        2
    );
}

#[test]
fn derive_display_name_prefers_first_name_line() {
    let text = "[Desktop Entry]\nName=Visual Tool\nName=Other\n";
    assert_eq!(derive_display_name(text, "tool"), "Visual Tool");
}

#[test]
fn derive_display_name_falls_back_to_base_name() {
    assert_eq!(derive_display_name("[Desktop Entry]\n", "Foo"), "Foo");
    assert_eq!(derive_display_name("Name=   \n", "Foo"), "Foo");
}

#[test]
fn derive_display_name_flattens_path_separators() {
    assert_eq!(derive_display_name("Name=AC/DC Player\n", "x"), "AC-DC Player");
}

#[test]
fn synthesize_without_manifest_fabricates_entry() {
    let entry = synthesize_entry(None, "Foo", Path::new("/store/Foo.AppImage"), None);
    assert_eq!(entry.mode, EntryMode::Fabricated);
    assert_eq!(entry.display_name, "Foo");
    assert!(entry.text.contains("Name=Foo\n"));
    assert!(entry.text.contains("Exec=/store/Foo.AppImage\n"));
    assert!(entry.text.contains("Icon=application-x-executable\n"));
}

#[test]
fn synthesize_with_manifest_patches_and_derives_name() {
    let entry = synthesize_entry(
        Some("[Desktop Entry]\nName=Foo Studio\nExec=foo\nIcon=foo\n"),
        "Foo",
        Path::new("/store/Foo.AppImage"),
        Some(Path::new("/icons/foo.svg")),
    );
    assert_eq!(entry.mode, EntryMode::Patched);
    assert_eq!(entry.display_name, "Foo Studio");
    assert!(entry.text.contains("Icon=/icons/foo.svg\n"));
}

#[test]
fn patch_inserts_name_after_header_when_manifest_has_none() {
    let raw = "[Desktop Entry]\nExec=app\nType=Application\n";
    let patched = patch_manifest(raw, "App", Path::new("/s/App.AppImage"), FALLBACK_ICON);
    assert_eq!(
        patched,
        "[Desktop Entry]\nName=App\nExec=/s/App.AppImage\nType=Application\n"
    );

    let headless = patch_manifest("Exec=app\n", "App", Path::new("/s/App.AppImage"), FALLBACK_ICON);
    assert_eq!(headless, "Name=App\nExec=/s/App.AppImage\n");
}

#[test]
fn synthesized_name_reads_back_through_record_parser() {
    let cases = [
        ("[Desktop Entry]\nName=AC/DC\nExec=acdc\n", "AC-DC"),
        ("[Desktop Entry]\nName=\nName=Later\nExec=foo\n", "Foo"),
        ("[Desktop Entry]\nName= Spaced \nExec=foo\n", "Spaced"),
        ("[Desktop Entry]\n  Name=Indented\nExec=foo\n", "Indented"),
        ("[Desktop Entry]\nExec=foo\n", "Foo"),
    ];
    for (manifest, expected) in cases {
        let entry = synthesize_entry(
            Some(manifest),
            "Foo",
            Path::new("/store/Foo.AppImage"),
            None,
        );
        assert_eq!(entry.display_name, expected, "manifest {manifest:?}");
        let record = RegistrationRecord::parse(&entry.text, "/apps/x.desktop");
        assert_eq!(record.display_name, entry.display_name, "manifest {manifest:?}");
    }
}

#[test]
fn patch_keeps_later_name_lines_untouched() {
    let raw = "[Desktop Entry]\nName=\nName=Later\nName[de]=Spaeter\n";
    let patched = patch_manifest(raw, "Foo", Path::new("/s/Foo.AppImage"), FALLBACK_ICON);
    assert_eq!(
        patched,
        "[Desktop Entry]\nName=Foo\nName=Later\nName[de]=Spaeter\n"
    );
}

#[test]
fn exit_codes_are_distinct_per_kind() {
    let errors = [
        AppImgError::NotFound {
            path: PathBuf::from("/x"),
        },
        AppImgError::ExtractionFailed {
            bundle: PathBuf::from("/x"),
            reason: "boom".to_string(),
        },
        AppImgError::InvalidIndex {
            selector: "5".to_string(),
            len: 3,
        },
        AppImgError::PartialDeleteFailure {
            failed: vec![PathBuf::from("/x")],
        },
    ];
    let mut codes = errors.iter().map(AppImgError::exit_code).collect::<Vec<_>>();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes, vec![3, 4, 5, 6]);
}

#[test]
fn invalid_index_message_names_selector_and_size() {
    let err = AppImgError::InvalidIndex {
        selector: "5".to_string(),
        len: 3,
    };
    assert_eq!(
        err.to_string(),
        "invalid index '5' (3 managed bundle(s) installed)"
    );
}
