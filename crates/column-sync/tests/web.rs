#![cfg(all(target_arch = "wasm32", feature = "web"))]

use column_sync::{Host, SyncConfig, bind_all, web::WebHost};
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::Event;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn binds_tables_in_live_dom() {
    let document = web_sys::window().unwrap().document().unwrap();
    let root = document.document_element().unwrap();
    let control = document.create_element("md-switch").unwrap();
    control.set_attribute("data-optional-group", "a\"]b").unwrap();
    let table = document.create_element("table").unwrap();
    table.set_attribute("data-optional-group", "a\"]b").unwrap();
    table.set_attribute("data-show-optional", "1").unwrap();
    root.append_child(&control).unwrap();
    root.append_child(&table).unwrap();

    let host = WebHost::new(document);
    let report = bind_all(&host, &SyncConfig::default());
    assert_eq!(report.bound(), 1);
    assert!(host.selected(&control));

    host.set_selected(&control, false);
    control
        .dispatch_event(&Event::new("input").unwrap())
        .unwrap();
    assert_eq!(
        table.get_attribute("data-show-optional").as_deref(),
        Some("0")
    );
}
