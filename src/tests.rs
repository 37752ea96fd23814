#[cfg(test)]
mod integration_tests {
    use crate::schemas::{ErrorResponse, HealthResponse, REMOTE_FAILURE_MESSAGE};
    use crate::test_utils::test_utils::{UNREACHABLE_REMOTE, init_test_tracing, setup_test_app};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use common::ApiResponse;
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_server() -> TestServer {
        TestServer::new(setup_test_app(UNREACHABLE_REMOTE)).unwrap()
    }

    fn details_body() -> serde_json::Value {
        json!({
            "category": "Camera",
            "sub_category": "Camera",
            "vertical": "DSLR",
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
            "per_page": 5
        })
    }

    fn detail_rows(count: usize) -> serde_json::Value {
        let rows: serde_json::Map<String, serde_json::Value> = (1..=count)
            .map(|i| {
                (
                    format!("CAMDSLR{:03}", i),
                    json!({"Total_sales": 1000.0 * i as f64, "total_units": i, "avg_sla": "NA",
                           "total_cod": 1, "total_prepaid": 3}),
                )
            })
            .collect();
        serde_json::Value::Object(rows)
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = test_server();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.categories, 5);
        assert_eq!(body.remote, UNREACHABLE_REMOTE);
    }

    #[tokio::test]
    async fn test_yearly_page_is_cached() {
        let server = test_server();

        let first = server.get("/api/v1/yearly").await;
        first.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = first.json();
        assert!(body.success);
        assert_eq!(body.message, "Yearly analysis retrieved successfully");
        assert_eq!(body.data["monthly_gmv"].as_array().unwrap().len(), 12);

        let second: ApiResponse<serde_json::Value> = server.get("/api/v1/yearly").await.json();
        assert_eq!(second.message, "Yearly analysis retrieved from cache");
        assert_eq!(second.data, body.data);
    }

    #[tokio::test]
    async fn test_climate_defaults_to_first_month_of_latest_year() {
        let server = test_server();

        let response = server.get("/api/v1/climate").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["year"], 2024);
        assert_eq!(body.data["month"], 1);
        assert_eq!(body.data["daily"].as_array().unwrap().len(), 31);
        assert!(body.data["current"].is_object());
    }

    #[tokio::test]
    async fn test_climate_rejects_bad_month_and_unknown_year() {
        let server = test_server();

        server
            .get("/api/v1/climate")
            .add_query_param("month", 13)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server
            .get("/api/v1/climate")
            .add_query_param("year", 2023)
            .add_query_param("month", 7)
            .await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_monthly_page() {
        let server = test_server();

        let response = server.get("/api/v1/monthly/3").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["month"], 3);
        assert_eq!(body.data["year"], 2024);
        assert_eq!(body.data["month_name"], "March");
        assert_eq!(body.data["category_gmv"].as_array().unwrap().len(), 5);
        assert_eq!(body.data["kpis"][1]["title"], "Conversion Rate");
        assert_eq!(body.data["kpis"][1]["value"], "3.8%");
    }

    #[tokio::test]
    async fn test_monthly_page_rejects_bad_month() {
        let server = test_server();

        server
            .get("/api/v1/monthly/13")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server.get("/api/v1/monthly/march").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_categories_page() {
        let server = test_server();

        let response = server.get("/api/v1/categories").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let categories = body.data["categories"].as_array().unwrap();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories[0]["id"], 1);
        assert!(!categories[0]["monthly"].as_array().unwrap().is_empty());
        assert_eq!(body.data["special_days"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_taxonomy_options() {
        let server = test_server();

        let all: ApiResponse<serde_json::Value> = server.get("/api/v1/taxonomy").await.json();
        assert_eq!(all.data["categories"].as_array().unwrap().len(), 5);

        let response = server.get("/api/v1/taxonomy/GameCDDVD").await;
        response.assert_status(StatusCode::OK);
        let games: ApiResponse<serde_json::Value> = response.json();
        let subcategories = games.data["categories"][0]["subcategories"].as_array().unwrap();
        assert_eq!(subcategories.len(), 2);

        let missing = server.get("/api/v1/taxonomy/Drones").await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let body: ErrorResponse = missing.json();
        assert_eq!(body.code, "CATEGORY_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_details_page_from_remote() {
        let _guard = init_test_tracing();
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get_details"))
            .and(body_partial_json(json!({"category": "Camera", "vertical": "DSLR"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_rows(7)))
            .expect(1)
            .mount(&remote)
            .await;
        let server = TestServer::new(setup_test_app(&remote.uri())).unwrap();

        let mut request = details_body();
        request["page"] = json!(2);
        let response = server.post("/api/v1/details").json(&request).await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["total_rows"], 7);
        assert_eq!(body.data["total_pages"], 2);
        assert_eq!(body.data["first_row"], 6);
        let rows = body.data["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["fsn_id"], "CAMDSLR006");
        assert_eq!(rows[0]["cod_percentage"], 25);
        assert!(rows[0]["avg_sla"].is_null());
    }

    #[tokio::test]
    async fn test_details_search_filters_rows() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/get_details"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_rows(12)))
            .mount(&remote)
            .await;
        let server = TestServer::new(setup_test_app(&remote.uri())).unwrap();

        let mut request = details_body();
        request["search"] = json!("dslr01");
        let body: ApiResponse<serde_json::Value> =
            server.post("/api/v1/details").json(&request).await.json();

        assert_eq!(body.data["total_rows"], 3);
        assert_eq!(body.data["page_window"], json!([1]));
    }

    #[tokio::test]
    async fn test_details_remote_failure_is_bad_gateway() {
        let server = test_server();

        let response = server.post("/api/v1/details").json(&details_body()).await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, REMOTE_FAILURE_MESSAGE);
        assert_eq!(body.code, "REMOTE_ERROR");
    }

    #[tokio::test]
    async fn test_details_rejects_invalid_requests() {
        let server = test_server();

        let mut bad_size = details_body();
        bad_size["per_page"] = json!(7);
        server
            .post("/api/v1/details")
            .json(&bad_size)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let mut reversed = details_body();
        reversed["start_date"] = json!("2024-02-01");
        server
            .post("/api/v1/details")
            .json(&reversed)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let mut unknown = details_body();
        unknown["category"] = json!("Drones");
        server
            .post("/api/v1/details")
            .json(&unknown)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_details_out_of_range_page() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(detail_rows(3)))
            .mount(&remote)
            .await;
        let server = TestServer::new(setup_test_app(&remote.uri())).unwrap();

        let mut request = details_body();
        request["page"] = json!(2);
        let response = server.post("/api/v1/details").json(&request).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_build_investment_request() {
        let server = test_server();

        let response = server
            .post("/api/v1/investments/request")
            .json(&json!({
                "month": 3,
                "events": [
                    {"kind": "HOLIDAY", "date": "2024-03-08"},
                    {"kind": "SALE_DAY", "start_date": "2024-03-10", "end_date": "2024-03-11"},
                    {"kind": "PAY_DAY", "date": "2024-03-31"}
                ]
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["month"], 3);
        assert_eq!(body.data["holiday"], json!(["2024-03-08"]));
        assert_eq!(body.data["salesday"], json!(["2024-03-10", "2024-03-11"]));
    }

    #[tokio::test]
    async fn test_investment_request_rejects_bad_input() {
        let server = test_server();

        server
            .post("/api/v1/investments/request")
            .json(&json!({"month": 0}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/v1/investments/request")
            .json(&json!({"month": 3, "events": [{"kind": "HOLIDAY"}]}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .post("/api/v1/investments/request")
            .json(&json!({"month": 3, "events": [
                {"kind": "SALE_DAY", "start_date": "2024-03-12", "end_date": "2024-03-10"}
            ]}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_investment() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/calculate_month_investment"))
            .and(body_partial_json(json!({"month": 6, "holiday": ["2024-06-17"]})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"TV": 0.5, "Digital": 0.3, "SEM": 0.2})),
            )
            .expect(1)
            .mount(&remote)
            .await;
        let server = TestServer::new(setup_test_app(&remote.uri())).unwrap();

        let response = server
            .post("/api/v1/investments/predict")
            .json(&json!({
                "month": 6,
                "events": [{"kind": "HOLIDAY", "date": "2024-06-17"}],
                "amount": "20000"
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let streams = body.data["streams"].as_array().unwrap();
        assert_eq!(streams.len(), 8);
        assert_eq!(streams[0]["id"], "TV");
        let tv_amount: Decimal = streams[0]["amount"].as_str().unwrap().parse().unwrap();
        assert_eq!(tv_amount, Decimal::from(10_000));
        assert_eq!(streams[0]["is_highest"], true);
        assert_eq!(streams.iter().filter(|s| s["is_highest"] == true).count(), 1);
    }

    #[tokio::test]
    async fn test_predict_rejects_budget_outside_slider() {
        let server = test_server();

        let response = server
            .post("/api/v1/investments/predict")
            .json(&json!({"month": 6, "amount": "500"}))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_predict_remote_error_is_bad_gateway() {
        let remote = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&remote)
            .await;
        let server = TestServer::new(setup_test_app(&remote.uri())).unwrap();

        let response = server
            .post("/api/v1/investments/predict")
            .json(&json!({"month": 6, "amount": "10000"}))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let body: ErrorResponse = response.json();
        assert_eq!(body.error, REMOTE_FAILURE_MESSAGE);
    }

    #[tokio::test]
    async fn test_calendar_grid() {
        let server = test_server();

        let response = server.get("/api/v1/calendar/2024/2").await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["days"].as_array().unwrap().len(), 29);
        assert_eq!(body.data["leading_blanks"], 4);

        server
            .get("/api/v1/calendar/2024/13")
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        let response = server.get("/api/v1/calendar/2024/feb").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_swagger_spec_is_served() {
        let server = test_server();

        let response = server.get("/api-docs/openapi.json").await;

        response.assert_status(StatusCode::OK);
        let openapi: serde_json::Value = response.json();
        assert_eq!(openapi["info"]["title"], "Sales Dashboard API");
    }
}
