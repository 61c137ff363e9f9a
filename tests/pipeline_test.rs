use std::collections::BTreeMap;
use std::sync::mpsc;

use chrono::NaiveDate;

use shopping_list_rs::logging::status_subscriber;
use shopping_list_rs::models::AlreadyHave;
use shopping_list_rs::sheets::{MemorySource, SheetLayout, Table, Workbook};
use shopping_list_rs::shopping::{build_shopping_list, BuildRequest};

fn sunday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 12).unwrap()
}

fn plan_row(name: &str, qty: &str, unit_type: &str, grams: &str) -> Vec<String> {
    let mut cells = vec![String::new(); 14];
    cells[0] = name.to_string();
    cells[1] = qty.to_string();
    cells[2] = unit_type.to_string();
    cells[13] = grams.to_string();
    cells
}

fn master_row(name: &str, qty: &str, unit: &str, food_type: &str) -> Vec<String> {
    let mut cells = vec![String::new(); 12];
    cells[0] = name.to_string();
    cells[4] = qty.to_string();
    cells[5] = unit.to_string();
    cells[11] = food_type.to_string();
    cells
}

fn recipe_row(name: &str, rec_unit: &str, rec_per_serv: &str, servings: &str) -> Vec<String> {
    let mut cells = vec![String::new(); 10];
    cells[0] = name.to_string();
    cells[2] = rec_unit.to_string();
    cells[7] = rec_per_serv.to_string();
    cells[9] = servings.to_string();
    cells
}

fn food_list(with_recipes: bool) -> Workbook {
    let master = Table::from_rows(vec![
        master_row("Name", "Qty", "Unit", "Food Type"),
        master_row("Chicken", "1", "piece", "meat"),
        master_row("Yogurt", "170", "g", "Dairy"),
        master_row("Foil", "1", "box", ""),
    ]);
    let raw = Table::from_rows([
        vec!["Name", "Serving Qty", "Serving Unit", "Food Type"],
        vec!["Black Beans", "0.5", "cup", "Canned"],
        vec!["Onion", "1", "piece", "Produce"],
    ]);
    let recipes = Table::from_rows(vec![
        recipe_row("Name", "", "", ""),
        recipe_row("Chili", "", "0.125", ""),
        recipe_row("Ingredients", "", "", ""),
        recipe_row("Black Beans", "cup", "", "4"),
        recipe_row("Onion", "", "", "1"),
    ]);

    let book = Workbook::new("Food List")
        .with_tab("Master", master)
        .with_tab("Raw Ingredients", raw);
    if with_recipes {
        book.with_tab("Recipes", recipes)
    } else {
        book
    }
}

fn source(with_recipes: bool) -> MemorySource {
    let chris = Workbook::new("Chris Food Plan")
        .with_tab(
            "Sunday",
            Table::from_rows(vec![
                plan_row("Breakfast", "", "", ""),
                plan_row("Chicken", "2", "servings", ""),
                plan_row("Yogurt", "340", "grams", "170"),
                plan_row("Chili", "4", "servings", ""),
            ]),
        )
        .with_tab(
            "Monday",
            Table::from_rows(vec![
                plan_row("Chili", "5", "servings", ""),
                plan_row("Foil", "1", "servings", ""),
                plan_row("Dragonfruit", "1", "servings", ""),
            ]),
        );
    MemorySource::new()
        .with(chris)
        .with(food_list(with_recipes))
}

fn logged<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
    let (tx, rx) = mpsc::channel();
    let result = tracing::subscriber::with_default(status_subscriber(tx), f);
    (result, rx.try_iter().collect())
}

fn request(days: Vec<String>, already_have: AlreadyHave) -> BuildRequest {
    let mut sheets = BTreeMap::new();
    sheets.insert("Chris Food Plan".to_string(), days);
    BuildRequest {
        sheets,
        catalog_workbook: "Food List".to_string(),
        layout: SheetLayout::default(),
        already_have,
        today: sunday(),
    }
}

#[test]
fn test_end_to_end_report() {
    let output = build_shopping_list(&request(vec![], AlreadyHave::new()), &source(true)).unwrap();

    // 9 servings of an 8 serving recipe needs two batches
    let beans = &output.shopping_list["Black Beans"];
    assert!((beans.amount.magnitude - 4.0).abs() < 1e-9);
    assert_eq!(beans.days.len(), 2);

    let report = &output.report;
    assert!(report.starts_with("Sunday Monday Tuesday"));
    assert!(report.contains(" - Chili - (Sun,Mon)\n"));
    assert!(report.contains("Meat\n----\n2.00 piece Chicken (10/12)\n"));
    assert!(report.contains("Dairy\n-----\n340.00 gram Yogurt (Sun)\n"));
    assert!(report.contains("Canned\n------\n4.00 cup Black Beans (Sun,Mon)\n"));
    assert!(report.contains("Produce\n-------\n2.00 piece Onion (Sun,Mon)\n"));
    assert!(report.trim_end().ends_with("No Category\n-----------\n1.00 box Foil (Mon)"));
    assert!(!report.contains("Dragonfruit"));
}

#[test]
fn test_report_is_deterministic() {
    let first = build_shopping_list(&request(vec![], AlreadyHave::new()), &source(true)).unwrap();
    let second = build_shopping_list(&request(vec![], AlreadyHave::new()), &source(true)).unwrap();
    assert_eq!(first.report, second.report);
}

#[test]
fn test_day_selection_limits_tabs() {
    let output = build_shopping_list(
        &request(vec!["Sunday".to_string()], AlreadyHave::new()),
        &source(true),
    )
    .unwrap();

    assert!(!output.shopping_list.contains_key("Foil"));
    // 4 servings is under one batch but still makes the whole recipe
    let beans = &output.shopping_list["Black Beans"];
    assert!((beans.amount.magnitude - 2.0).abs() < 1e-9);
}

#[test]
fn test_already_have_suppression() {
    let have = AlreadyHave::from_names(["chicken", "CHILI"]);
    let output = build_shopping_list(&request(vec![], have), &source(true)).unwrap();

    assert!(!output.shopping_list.contains_key("Chicken"));
    assert!(!output.shopping_list.contains_key("Black Beans"));
    assert!(output.used_recipes.is_empty());
    assert!(!output.report.contains("Meat"));
}

#[test]
fn test_already_have_amount_logged_once() {
    let have = AlreadyHave::from_names(["black beans"]);
    let (output, lines) = logged(|| build_shopping_list(&request(vec![], have), &source(true)));
    assert!(!output.unwrap().shopping_list.contains_key("Black Beans"));

    let reported: Vec<&String> = lines
        .iter()
        .filter(|l| l.contains("Assuming already have"))
        .collect();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].ends_with("Assuming already have 4.00 cup of Black Beans"));
}

#[test]
fn test_unknown_day_name_is_warned() {
    let (output, lines) = logged(|| {
        build_shopping_list(&request(vec!["Sun".to_string()], AlreadyHave::new()), &source(true))
    });
    assert!(output.unwrap().shopping_list.is_empty());

    let warning = lines
        .iter()
        .find(|l| l.contains("WARN") && l.contains("not a weekday name"));
    assert!(warning.is_some_and(|l| l.contains("Sun") && l.contains("Chris Food Plan")));
}

#[test]
fn test_missing_recipes_table_still_builds() {
    let (output, lines) = logged(|| {
        build_shopping_list(&request(vec![], AlreadyHave::new()), &source(false))
    });
    let output = output.unwrap();
    assert!(lines
        .iter()
        .any(|l| l.contains("ERROR") && l.contains("Missing recipes table")));

    assert!(output.used_recipes.is_empty());
    assert!(output.shopping_list.is_empty());
    assert!(output.report.contains("Recipes Making this Week\n------------------------\n\n"));
}

#[test]
fn test_unopenable_plan_aborts() {
    let mut req = request(vec![], AlreadyHave::new());
    req.sheets.insert("Nobody's Plan".to_string(), Vec::new());
    assert!(build_shopping_list(&req, &source(true)).is_err());
}
