#![cfg(target_arch = "wasm32")]
use std::collections::BTreeMap;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use carbon_core::view::chart::{category_chart, source_chart};

fn get(value: &JsValue, path: &[&str]) -> JsValue {
    path.iter().fold(value.clone(), |v, key| {
        js_sys::Reflect::get(&v, &JsValue::from_str(key)).unwrap()
    })
}

#[wasm_bindgen_test]
fn test_chart_config_is_plain_object() {
    let map = BTreeMap::from([("Factory A".to_string(), 525.0)]);
    let config = carbon_web::chart::to_js(&source_chart(&map).chartjs_config()).unwrap();

    assert_eq!(get(&config, &["type"]).as_string().as_deref(), Some("bar"));
    assert_eq!(
        get(&config, &["options", "scales", "y", "beginAtZero"]).as_bool(),
        Some(true)
    );
    let labels = js_sys::Array::from(&get(&config, &["data", "labels"]));
    assert_eq!(labels.length(), 1);
}

#[wasm_bindgen_test]
fn test_doughnut_palette_survives_conversion() {
    let map = BTreeMap::from([("Dairy".to_string(), 152.0)]);
    let config = carbon_web::chart::to_js(&category_chart(&map).chartjs_config()).unwrap();
    let datasets = js_sys::Array::from(&get(&config, &["data", "datasets"]));
    let colors = js_sys::Array::from(&get(&datasets.get(0), &["backgroundColor"]));
    assert_eq!(colors.get(0).as_string().as_deref(), Some("#FF6384"));
}
