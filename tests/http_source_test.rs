use httpmock::prelude::*;
use jyotish_lookup::{Category, DayInput, DayRecommender, HttpSource, ReferenceIndex};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn vara_document() -> serde_json::Value {
    json!({
        "dias": [
            {
                "vara": "Ravivara",
                "transliteracion": "Ravivāra",
                "es": "Domingo",
                "planeta": "Sol",
                "clasificacion": "Cruel (krūra)",
                "favorables": ["ceremonias", "asuntos de gobierno"],
                "desfavorables": ["viajes al oeste"]
            },
            {
                "vara": "Somavara",
                "transliteracion": "Somavāra",
                "es": "Lunes",
                "clasificacion": "Favorable",
                "favorables": ["agricultura"]
            }
        ]
    })
}

fn http_index(server: &MockServer) -> ReferenceIndex {
    let source = HttpSource::new(&server.url("/db/"), Duration::from_secs(5)).unwrap();
    ReferenceIndex::new(Arc::new(source), Duration::from_secs(30 * 60))
}

#[tokio::test]
async fn test_sunday_resolves_over_http() {
    let server = MockServer::start();
    let vara_mock = server.mock(|when, then| {
        when.method(GET).path("/db/Vara.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(vara_document());
    });

    let index = http_index(&server);
    let entry = index.find_entry(Category::Vara, "Sunday").await.unwrap();

    assert_eq!(entry.name, "Ravivara");
    assert_eq!(entry.planet.as_deref(), Some("Sol"));
    assert!(entry.favorables.contains(&"ceremonias".to_string()));

    // 第二次查詢走快取
    let monday = index.find_entry(Category::Vara, "Lunes").await.unwrap();
    assert_eq!(monday.name, "Somavara");
    vara_mock.assert_hits(1);
}

#[tokio::test]
async fn test_concurrent_lookups_share_one_fetch() {
    let server = MockServer::start();
    let vara_mock = server.mock(|when, then| {
        when.method(GET).path("/db/Vara.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .delay(Duration::from_millis(200))
            .json_body(vara_document());
    });

    let index = http_index(&server);
    let (sunday, monday, ravi) = tokio::join!(
        index.find_entry(Category::Vara, "Sunday"),
        index.find_entry(Category::Vara, "Monday"),
        index.find_entry(Category::Vara, "Ravi Vara"),
    );

    assert_eq!(sunday.unwrap().name, "Ravivara");
    assert_eq!(monday.unwrap().name, "Somavara");
    assert_eq!(ravi.unwrap().name, "Ravivara");
    vara_mock.assert_hits(1);
}

#[tokio::test]
async fn test_missing_remote_file_is_not_found_and_not_cached() {
    let server = MockServer::start();
    let missing = server.mock(|when, then| {
        when.method(GET).path("/db/karanas.json");
        then.status(404);
    });

    let index = http_index(&server);

    assert!(index.find(Category::Karana, "Bava").await.is_none());
    assert!(index.find(Category::Karana, "Bava").await.is_none());

    // 失敗不寫入快取，每次都重試
    missing.assert_hits(2);
    assert!(index.stats().entries.is_empty());
}

#[tokio::test]
async fn test_unexpected_schema_yields_empty_dataset() {
    let server = MockServer::start();
    let tithi_mock = server.mock(|when, then| {
        when.method(GET).path("/db/TIthi.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({ "unexpected": true }));
    });

    let index = http_index(&server);

    let dataset = tokio_test::assert_ok!(index.load(Category::Tithi).await);
    assert!(dataset.is_empty());
    assert!(index.find(Category::Tithi, "Ekadashi").await.is_none());
    tithi_mock.assert_hits(1);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let server = MockServer::start();
    let vara_mock = server.mock(|when, then| {
        when.method(GET).path("/db/Vara.json");
        then.status(200).json_body(vara_document());
    });

    let index = http_index(&server);
    assert!(index.find(Category::Vara, "Domingo").await.is_some());
    index.invalidate(Category::Vara).await;
    assert!(index.find(Category::Vara, "Domingo").await.is_some());

    vara_mock.assert_hits(2);
}

#[tokio::test]
async fn test_recommendations_with_partial_remote_data() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/db/Vara.json");
        then.status(200).json_body(vara_document());
    });
    server.mock(|when, then| {
        when.method(GET).path("/db/yogas-special.json");
        then.status(200).json_body(json!({
            "yogas": {
                "visha": {
                    "name": "Visha Yoga",
                    "polarity": "negative",
                    "avoid_activities": ["viajes", "iniciar negocios"]
                }
            }
        }));
    });
    for file in ["/db/Nakashatras.json", "/db/TIthi.json"] {
        server.mock(|when, then| {
            when.method(GET).path(file);
            then.status(500);
        });
    }

    let index = http_index(&server);
    let day = DayInput {
        vara: Some("Sunday".to_string()),
        nakshatra: Some("Ashwini".to_string()),
        tithi: Some("Ekadashi".to_string()),
        special_yogas: vec!["Vish Yoga".to_string()],
        ..Default::default()
    };

    let recommendations = DayRecommender::new(&index).recommend(&day).await;

    assert!(recommendations.nakshatra.is_none());
    assert!(recommendations.tithi.is_none());
    assert_eq!(recommendations.vara.as_ref().unwrap().name, "Ravivara");
    assert_eq!(
        recommendations.summary.favorable_activities,
        vec!["ceremonias", "asuntos de gobierno"]
    );
    assert_eq!(
        recommendations.summary.special_avoid_activities,
        vec!["viajes", "iniciar negocios"]
    );
}
