use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use stringsheet::formats::xlsx::write_workbook;
use stringsheet::{ExportOptions, Translations};
use tempfile::TempDir;
use zip::ZipArchive;

fn sample() -> Translations {
    let mut translations = Translations::new();
    translations.set_value("app_name", "values", Some("Foo".into()), true);
    translations.set_value("app_name", "values-de", Some("Bar".into()), true);
    translations.set_value("title", "values", Some("Title".into()), true);
    translations.set_value("api_key", "values", Some("abc".into()), false);
    translations.set_value("steps#PLURALS#one", "values", Some("%d step".into()), true);
    translations.set_value("steps#PLURALS#few", "values", None, true);
    translations.set_value("steps#PLURALS#few", "values-de", Some("%d Schritte".into()), true);
    translations
}

fn read_entry(path: &Path, name: &str) -> Option<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    Some(content)
}

fn entry_names(path: &Path) -> Vec<String> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    (0..archive.len())
        .map(|idx| archive.by_index(idx).unwrap().name().to_string())
        .collect()
}

#[test]
fn test_export_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.xlsx");
    let second = temp_dir.path().join("second.xlsx");

    write_workbook(&sample(), &first, &ExportOptions::new()).unwrap();
    write_workbook(&sample(), &second, &ExportOptions::new()).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_unformatted_export_is_byte_identical() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.xlsx");
    let second = temp_dir.path().join("second.xlsx");
    let options = ExportOptions::new().with_formatting(false);

    write_workbook(&sample(), &first, &options).unwrap();
    write_workbook(&sample(), &second, &options).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_package_entries_are_sorted_and_timestamps_removed() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("translations.xlsx");
    write_workbook(&sample(), &output, &ExportOptions::new()).unwrap();

    let names = entry_names(&output);
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    let core = read_entry(&output, "docProps/core.xml").unwrap();
    assert!(!core.contains("dcterms:created>"));
    assert!(!core.contains("dcterms:modified>"));
    assert!(core.contains("stringsheet"));

    let workbook = read_entry(&output, "xl/workbook.xml").unwrap();
    assert!(workbook.contains(r#"name="Translations""#));
}

#[test]
fn test_formatting_markers_present() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("translations.xlsx");
    write_workbook(&sample(), &output, &ExportOptions::new()).unwrap();

    let sheet = read_entry(&output, "xl/worksheets/sheet1.xml").unwrap();
    assert!(sheet.contains("<pane"));
    assert!(sheet.contains(r#"xSplit="3""#));
    assert!(sheet.contains(r#"ySplit="1""#));
    // 5 data rows below the header, columns A..D
    assert!(sheet.contains(r#"<autoFilter ref="A1:D6"/>"#));
    assert!(sheet.contains(r#"hidden="1""#));

    assert!(entry_names(&output).iter().any(|name| name.starts_with("xl/comments")));
    let comments = read_entry(&output, "xl/comments1.xml").unwrap();
    assert!(comments.contains("marked as not-translatable"));
    assert!(comments.contains("quantity &apos;few&apos;") || comments.contains("quantity 'few'"));

    let styles = read_entry(&output, "xl/styles.xml").unwrap();
    assert!(styles.contains("FF8080"));
    assert!(styles.contains("FFFFCC"));
    assert!(styles.contains("C0C0C0"));
}

#[test]
fn test_unformatted_export_has_no_markers() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("translations.xlsx");
    write_workbook(&sample(), &output, &ExportOptions::new().with_formatting(false)).unwrap();

    let sheet = read_entry(&output, "xl/worksheets/sheet1.xml").unwrap();
    assert!(!sheet.contains("<pane"));
    assert!(!sheet.contains("<autoFilter"));
    assert!(!sheet.contains(r#"hidden="1""#));
    assert!(!entry_names(&output).iter().any(|name| name.starts_with("xl/comments")));
}

#[test]
fn test_export_to_nested_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("reports/2024/translations.xlsx");
    write_workbook(&Translations::new(), &output, &ExportOptions::new()).unwrap();
    assert!(output.is_file());
}
