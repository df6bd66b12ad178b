#[cfg(test)]
mod integration_tests {
    use crate::handlers::assets::CreateAssetRequest;
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::{setup_test_app, setup_test_app_with_state};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::NaiveDate;
    use model::entities::{depreciation_record, production_usage};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use sea_orm::{EntityTrait, PaginatorTrait};
    use serde_json::{json, Value};

    /// Decimals travel as strings; SQLite hands some back with a different scale.
    fn decimal(value: &Value) -> Decimal {
        match value {
            Value::String(s) => s.parse().expect("decimal string"),
            Value::Number(n) => n.to_string().parse().expect("decimal number"),
            other => panic!("expected a decimal, got {}", other),
        }
    }

    fn straight_line_request(name: &str) -> CreateAssetRequest {
        CreateAssetRequest {
            name: name.to_string(),
            description: Some("Packaging machine".to_string()),
            asset_type: "Equipment".to_string(),
            cost: dec!(10000),
            purchase_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            location: "Plant 1".to_string(),
            condition: "New".to_string(),
            depreciation_method: "STRAIGHT_LINE".to_string(),
            useful_life: 5,
            salvage_value: dec!(1000),
            total_estimated_units: None,
        }
    }

    fn units_request(name: &str) -> CreateAssetRequest {
        CreateAssetRequest {
            cost: dec!(50000),
            salvage_value: dec!(5000),
            useful_life: 10,
            depreciation_method: "UNITS_OF_PRODUCTION".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2023, 1, 10).unwrap(),
            total_estimated_units: Some(dec!(90000)),
            ..straight_line_request(name)
        }
    }

    async fn create_asset(server: &TestServer, request: &CreateAssetRequest) -> Value {
        let response = server.post("/api/v1/assets").json(request).await;
        if response.status_code() != StatusCode::CREATED {
            println!("Error response: {}", response.text());
            panic!("Expected 201 Created, got {}", response.status_code());
        }
        let body: ApiResponse<Value> = response.json();
        assert!(body.success);
        body.data
    }

    async fn schedule(server: &TestServer, asset_id: i64) -> Vec<Value> {
        let response = server
            .get(&format!("/api/v1/assets/{}/depreciation", asset_id))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        body.data
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
        assert_eq!(body["tracked_assets"], 0);
    }

    #[tokio::test]
    async fn test_prometheus_metrics_endpoint() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        // Metrics are not mounted in test builds
        let response = server.get("/metrics").await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_calculate_straight_line() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/depreciation/calculate")
            .json(&json!({
                "cost": "10000",
                "salvage_value": "1000",
                "useful_life": 9,
                "depreciation_method": "STRAIGHT_LINE",
                "year": 3
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(decimal(&body.data["yearly_depreciation"]), dec!(1000));
        assert_eq!(decimal(&body.data["accumulated_depreciation"]), dec!(3000));
        assert_eq!(decimal(&body.data["book_value"]), dec!(7000));
    }

    #[tokio::test]
    async fn test_calculate_units_of_production() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/depreciation/calculate")
            .json(&json!({
                "cost": "50000",
                "salvage_value": "5000",
                "useful_life": 10,
                "depreciation_method": "UNITS_OF_PRODUCTION",
                "year": 1,
                "units_produced": "9000",
                "total_estimated_units": "90000"
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(decimal(&body.data["yearly_depreciation"]), dec!(4500));
        assert_eq!(decimal(&body.data["book_value"]), dec!(45500));
    }

    #[tokio::test]
    async fn test_calculate_rejects_bad_input() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let unknown_method = server
            .post("/api/v1/depreciation/calculate")
            .json(&json!({
                "cost": "10000",
                "salvage_value": "1000",
                "useful_life": 5,
                "depreciation_method": "SUM_OF_YEARS_DIGITS",
                "year": 1
            }))
            .await;
        unknown_method.assert_status(StatusCode::BAD_REQUEST);
        let error_body: Value = unknown_method.json();
        assert_eq!(error_body["success"], false);
        assert_eq!(error_body["code"], "INVALID_ARGUMENT");
        assert!(
            error_body["error"]
                .as_str()
                .unwrap()
                .contains("unknown depreciation method")
        );

        let missing_units = server
            .post("/api/v1/depreciation/calculate")
            .json(&json!({
                "cost": "10000",
                "salvage_value": "1000",
                "useful_life": 5,
                "depreciation_method": "UNITS_OF_PRODUCTION",
                "year": 1
            }))
            .await;
        missing_units.assert_status(StatusCode::BAD_REQUEST);
        let error_body: Value = missing_units.json();
        assert!(
            error_body["error"]
                .as_str()
                .unwrap()
                .contains("units required for this method")
        );

        let zero_life = server
            .post("/api/v1/depreciation/calculate")
            .json(&json!({
                "cost": "10000",
                "salvage_value": "1000",
                "useful_life": 0,
                "depreciation_method": "STRAIGHT_LINE",
                "year": 1
            }))
            .await;
        zero_life.assert_status(StatusCode::BAD_REQUEST);

        let distant_year = server
            .post("/api/v1/depreciation/calculate")
            .json(&json!({
                "cost": "10000",
                "salvage_value": "1000",
                "useful_life": 5,
                "depreciation_method": "DECLINING_BALANCE",
                "year": i32::MAX
            }))
            .await;
        distant_year.assert_status(StatusCode::BAD_REQUEST);
        let error_body: Value = distant_year.json();
        assert_eq!(error_body["code"], "INVALID_ARGUMENT");
        assert!(error_body["error"].as_str().unwrap().contains("year"));
    }

    #[tokio::test]
    async fn test_depreciation_methods() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/depreciation-methods").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = response.json();
        let codes: Vec<&str> = body.data.iter().map(|m| m["code"].as_str().unwrap()).collect();
        assert_eq!(
            codes,
            vec!["STRAIGHT_LINE", "DECLINING_BALANCE", "UNITS_OF_PRODUCTION"]
        );
        assert_eq!(body.data[2]["requires_units"], true);
    }

    #[tokio::test]
    async fn test_create_asset_builds_schedule() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let asset = create_asset(&server, &straight_line_request("Filler")).await;
        assert_eq!(asset["status"], "ACTIVE");
        assert_eq!(asset["depreciation_method"], "STRAIGHT_LINE");
        // Inserted at 1, bumped by the initial regeneration
        assert_eq!(asset["version"], 2);

        let rows = schedule(&server, asset["id"].as_i64().unwrap()).await;
        let years: Vec<i64> = rows.iter().map(|r| r["year"].as_i64().unwrap()).collect();
        assert_eq!(years, vec![2022, 2023, 2024]);
        assert!(rows.iter().all(|r| decimal(&r["amount"]) == dec!(1800)));
        assert_eq!(decimal(&rows[2]["accumulated_depreciation"]), dec!(5400));
        assert_eq!(decimal(&rows[2]["book_value"]), dec!(4600));
    }

    #[tokio::test]
    async fn test_create_asset_with_invalid_input_persists_nothing() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let bad_method = CreateAssetRequest {
            depreciation_method: "MACRS".to_string(),
            ..straight_line_request("Crane")
        };
        let response = server.post("/api/v1/assets").json(&bad_method).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let salvage_above_cost = CreateAssetRequest {
            salvage_value: dec!(20000),
            ..straight_line_request("Crane")
        };
        let response = server.post("/api/v1/assets").json(&salvage_above_cost).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let empty_name = straight_line_request("");
        let response = server.post("/api/v1/assets").json(&empty_name).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error_body: Value = response.json();
        assert_eq!(error_body["code"], "INVALID_ARGUMENT");

        let list = server.get("/api/v1/assets").await;
        list.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<Value>> = list.json();
        assert!(body.data.is_empty());
    }

    #[tokio::test]
    async fn test_list_assets_with_status_filter() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        create_asset(&server, &straight_line_request("Forklift")).await;
        let second = create_asset(&server, &straight_line_request("Pallet jack")).await;
        server
            .put(&format!("/api/v1/assets/{}", second["id"]))
            .json(&json!({ "status": "INACTIVE" }))
            .await
            .assert_status(StatusCode::OK);

        let active: ApiResponse<Vec<Value>> =
            server.get("/api/v1/assets?status=ACTIVE").await.json();
        assert_eq!(active.data.len(), 1);
        assert_eq!(active.data[0]["name"], "Forklift");

        let paged: ApiResponse<Vec<Value>> =
            server.get("/api/v1/assets?page=2&limit=1").await.json();
        assert_eq!(paged.data.len(), 1);
        assert_eq!(paged.data[0]["name"], "Pallet jack");

        server
            .get("/api/v1/assets?status=SOLD")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        server
            .get("/api/v1/assets?limit=0")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_regenerate_is_idempotent() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &straight_line_request("Compressor")).await;
        let path = format!("/api/v1/assets/{}/depreciation", asset["id"]);

        let first = server.post(&path).await;
        first.assert_status(StatusCode::OK);
        let second = server.post(&path).await;
        second.assert_status(StatusCode::OK);

        let first: ApiResponse<Vec<Value>> = first.json();
        let second: ApiResponse<Vec<Value>> = second.json();
        assert_eq!(first.data, second.data);
        assert_eq!(
            depreciation_record::Entity::find().count(&state.db).await.unwrap(),
            3
        );
    }

    #[tokio::test]
    async fn test_unknown_asset_returns_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        for response in [
            server.get("/api/v1/assets/404").await,
            server.get("/api/v1/assets/404/depreciation").await,
            server.post("/api/v1/assets/404/depreciation").await,
            server.get("/api/v1/assets/404/history").await,
            server.delete("/api/v1/assets/404").await,
        ] {
            response.assert_status(StatusCode::NOT_FOUND);
            let error_body: Value = response.json();
            assert_eq!(error_body["code"], "NOT_FOUND");
        }
    }

    #[tokio::test]
    async fn test_update_asset_regenerates_and_invalidates_cache() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &straight_line_request("Oven")).await;
        let asset_id = asset["id"].as_i64().unwrap();

        // Fill the cache
        let before = schedule(&server, asset_id).await;
        assert_eq!(decimal(&before[0]["amount"]), dec!(1800));

        let response = server
            .put(&format!("/api/v1/assets/{}", asset_id))
            .json(&json!({ "useful_life": 3, "version": 2 }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.message, "Asset updated and depreciation schedule regenerated");
        assert_eq!(body.data["useful_life"], 3);
        // One bump for the edit, one for the regeneration
        assert_eq!(body.data["version"], 4);

        let after = schedule(&server, asset_id).await;
        assert!(after.iter().all(|r| decimal(&r["amount"]) == dec!(3000)));
        assert_eq!(decimal(&after[2]["book_value"]), dec!(1000));
    }

    #[tokio::test]
    async fn test_update_asset_rejects_stale_version_and_disposed_status() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &straight_line_request("Mixer")).await;
        let path = format!("/api/v1/assets/{}", asset["id"]);

        let stale = server
            .put(&path)
            .json(&json!({ "cost": "12000", "version": 1 }))
            .await;
        stale.assert_status(StatusCode::CONFLICT);
        let error_body: Value = stale.json();
        assert_eq!(error_body["code"], "CONFLICT");

        let disposed = server
            .put(&path)
            .json(&json!({ "status": "DISPOSED" }))
            .await;
        disposed.assert_status(StatusCode::BAD_REQUEST);

        let unchanged: ApiResponse<Value> = server.get(&path).await.json();
        assert_eq!(decimal(&unchanged.data["cost"]), dec!(10000));
        assert_eq!(unchanged.data["status"], "ACTIVE");

        // Non-financial edits leave the schedule alone
        let renamed = server.put(&path).json(&json!({ "location": "Plant 3" })).await;
        renamed.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = renamed.json();
        assert_eq!(body.message, "Asset updated successfully");
        assert_eq!(body.data["version"], 3);
    }

    #[tokio::test]
    async fn test_calculate_for_asset_records_usage() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &units_request("Bottling line")).await;
        let asset_id = asset["id"].as_i64().unwrap();

        // No usage yet, so nothing has been charged
        let initial = schedule(&server, asset_id).await;
        assert_eq!(initial.len(), 2);
        assert!(initial.iter().all(|r| decimal(&r["amount"]) == Decimal::ZERO));

        let response = server
            .post(&format!("/api/v1/assets/{}/depreciation/calculate", asset_id))
            .json(&json!({ "year": 2023, "units_produced": "9000" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["year"], 2023);
        assert_eq!(decimal(&body.data["amount"]), dec!(4500));
        assert_eq!(decimal(&body.data["book_value"]), dec!(45500));
        assert_eq!(
            production_usage::Entity::find().count(&state.db).await.unwrap(),
            1
        );

        // A full regeneration picks the stored usage up
        let regenerated: ApiResponse<Vec<Value>> = server
            .post(&format!("/api/v1/assets/{}/depreciation", asset_id))
            .await
            .json();
        assert_eq!(decimal(&regenerated.data[0]["amount"]), dec!(4500));
        assert_eq!(decimal(&regenerated.data[1]["amount"]), Decimal::ZERO);
        assert_eq!(decimal(&regenerated.data[1]["book_value"]), dec!(45500));

        let before_purchase = server
            .post(&format!("/api/v1/assets/{}/depreciation/calculate", asset_id))
            .json(&json!({ "year": 2020, "units_produced": "10" }))
            .await;
        before_purchase.assert_status(StatusCode::BAD_REQUEST);

        let too_many_units = server
            .post(&format!("/api/v1/assets/{}/depreciation/calculate", asset_id))
            .json(&json!({ "year": 2024, "units_produced": "95000" }))
            .await;
        too_many_units.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_disposal_workflow() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &straight_line_request("Van")).await;
        let path = format!("/api/v1/assets/{}/disposal", asset["id"]);

        let request = json!({
            "disposal_date": "2024-05-01",
            "disposal_value": "5000",
            "reason": "Replaced by electric van"
        });
        let created = server.post(&path).json(&request).await;
        created.assert_status(StatusCode::CREATED);
        let body: ApiResponse<Value> = created.json();
        assert_eq!(body.data["status"], "PENDING");

        // Only one pending request at a time
        server
            .post(&path)
            .json(&request)
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .put(&path)
            .json(&json!({ "status": "MAYBE" }))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let approved = server.put(&path).json(&json!({ "status": "APPROVED" })).await;
        approved.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = approved.json();
        assert_eq!(body.data["disposal"]["status"], "APPROVED");
        assert_eq!(body.data["asset"]["status"], "DISPOSED");

        // Nothing left to review, and a disposed asset takes no new requests
        server
            .put(&path)
            .json(&json!({ "status": "REJECTED" }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .post(&path)
            .json(&request)
            .await
            .assert_status(StatusCode::CONFLICT);

        // Disposal is final, a plain edit cannot reactivate the asset
        let asset_path = format!("/api/v1/assets/{}", asset["id"]);
        server
            .put(&asset_path)
            .json(&json!({ "status": "ACTIVE" }))
            .await
            .assert_status(StatusCode::CONFLICT);
        let still_disposed: ApiResponse<Value> = server.get(&asset_path).await.json();
        assert_eq!(still_disposed.data["status"], "DISPOSED");
    }

    #[tokio::test]
    async fn test_update_asset_clears_optional_fields_with_null() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &units_request("Press")).await;
        let path = format!("/api/v1/assets/{}", asset["id"]);

        // Omitted fields stay as they are
        let renamed: ApiResponse<Value> = server
            .put(&path)
            .json(&json!({ "name": "Press 2" }))
            .await
            .json();
        assert_eq!(renamed.data["description"], "Packaging machine");
        assert_eq!(decimal(&renamed.data["total_estimated_units"]), dec!(90000));

        let cleared = server
            .put(&path)
            .json(&json!({
                "description": null,
                "total_estimated_units": null,
                "depreciation_method": "STRAIGHT_LINE"
            }))
            .await;
        cleared.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = cleared.json();
        assert!(body.data["description"].is_null());
        assert!(body.data["total_estimated_units"].is_null());
        assert_eq!(body.data["depreciation_method"], "STRAIGHT_LINE");
    }

    #[tokio::test]
    async fn test_rejected_disposal_keeps_asset_active() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &straight_line_request("Drill")).await;
        let path = format!("/api/v1/assets/{}/disposal", asset["id"]);

        server
            .post(&path)
            .json(&json!({
                "disposal_date": "2024-02-01",
                "disposal_value": "100",
                "reason": "Worn out"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let rejected: ApiResponse<Value> = server
            .put(&path)
            .json(&json!({ "status": "REJECTED" }))
            .await
            .json();
        assert_eq!(rejected.data["disposal"]["status"], "REJECTED");
        assert_eq!(rejected.data["asset"]["status"], "ACTIVE");
    }

    #[tokio::test]
    async fn test_asset_history() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &straight_line_request("Scanner")).await;
        let asset_id = asset["id"].as_i64().unwrap();
        server
            .post(&format!("/api/v1/assets/{}/disposal", asset_id))
            .json(&json!({
                "disposal_date": "2024-03-15",
                "disposal_value": "4000",
                "reason": "Obsolete"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .get(&format!("/api/v1/assets/{}/history", asset_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Value> = response.json();
        assert_eq!(body.data["asset"]["name"], "Scanner");
        assert_eq!(body.data["depreciation"].as_array().unwrap().len(), 3);
        assert_eq!(body.data["disposals"].as_array().unwrap().len(), 1);
        assert_eq!(body.data["disposals"][0]["reason"], "Obsolete");
    }

    #[tokio::test]
    async fn test_delete_asset_cascades() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();
        let asset = create_asset(&server, &straight_line_request("Printer")).await;
        let path = format!("/api/v1/assets/{}", asset["id"]);

        let response = server.delete(&path).await;
        response.assert_status(StatusCode::OK);

        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        server.delete(&path).await.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(
            depreciation_record::Entity::find().count(&state.db).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_reports() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();
        let truck = create_asset(&server, &straight_line_request("Truck")).await;
        create_asset(&server, &units_request("Conveyor")).await;
        server
            .post(&format!("/api/v1/assets/{}/disposal", truck["id"]))
            .json(&json!({
                "disposal_date": "2024-05-01",
                "disposal_value": "5000",
                "reason": "Sold"
            }))
            .await
            .assert_status(StatusCode::CREATED);

        let asset_value: ApiResponse<Value> = server
            .get("/api/v1/reports?type=asset-value&start_date=2022-01-01&end_date=2022-12-31")
            .await
            .json();
        assert_eq!(asset_value.data["report_type"], "asset-value");
        assert_eq!(asset_value.data["row_count"], 1);
        assert_eq!(asset_value.data["rows"][0]["name"], "Truck");
        assert_eq!(decimal(&asset_value.data["rows"][0]["current_value"]), dec!(4600));

        let depreciation: ApiResponse<Value> = server
            .get("/api/v1/reports?type=depreciation&start_date=2023-01-01&end_date=2023-12-31")
            .await
            .json();
        let rows = depreciation.data["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r["year"] == 2023));

        let disposal: ApiResponse<Value> = server
            .get("/api/v1/reports?type=disposal&start_date=2024-01-01&end_date=2024-12-31")
            .await
            .json();
        let row = &disposal.data["rows"][0];
        assert_eq!(row["asset_name"], "Truck");
        assert_eq!(decimal(&row["book_value"]), dec!(4600));
        assert_eq!(decimal(&row["gain_or_loss"]), dec!(400));
    }

    #[tokio::test]
    async fn test_reports_reject_bad_queries() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let unknown = server
            .get("/api/v1/reports?type=balance-sheet&start_date=2024-01-01&end_date=2024-12-31")
            .await;
        unknown.assert_status(StatusCode::BAD_REQUEST);
        let error_body: Value = unknown.json();
        assert_eq!(error_body["code"], "INVALID_ARGUMENT");

        server
            .get("/api/v1/reports?type=depreciation&start_date=2024-12-31&end_date=2024-01-01")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
