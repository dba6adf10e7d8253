use super::*;

#[tokio::test]
async fn data_sources_lists_every_source() {
    let Json(sources) = data_sources().await;
    let value = serde_json::to_value(sources).unwrap();
    let ids: Vec<&str> = value.as_array().unwrap().iter().filter_map(|s| s["id"].as_str()).collect();
    assert_eq!(ids, vec!["devices", "maintenance", "service_requests", "compliance"]);
}

#[tokio::test]
async fn chart_types_are_in_variant_order() {
    let Json(types) = chart_types().await;
    let names: Vec<&str> = types.iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["Bar Chart", "Line Chart", "Pie Chart", "Area Chart"]);
}

#[tokio::test]
async fn palette_serializes_templates() {
    let Json(templates) = palette().await;
    let value = serde_json::to_value(templates).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 7);
    assert_eq!(value[0]["chartVariant"], "bar");
    assert!(value[4].get("chartVariant").is_none());
    assert_eq!(value[6]["kind"], "filter");
}
