//! Integration tests for league and user resources over HTTP

use serde_json::{json, Value};
use std::cell::RefCell;
use std::time::Duration;
use wiremock::{
    matchers::{body_string, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};
use yahoo_fantasy::{with_callback, Credentials, YahooError, YahooFantasy};

fn bearer_client(server: &MockServer) -> YahooFantasy {
    let yf = YahooFantasy::builder(Credentials::new("ck", "cs"))
        .api_base_url(format!("{}/fantasy/v2", server.uri()))
        .auth_base_url(server.uri())
        .build()
        .unwrap();
    yf.set_user_token("at");
    yf
}

async fn serve(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("authorization", "Bearer at"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn league_meta() -> Value {
    json!({ "league_key": "nfl.l.1", "name": "Office", "scoring_type": "head" })
}

#[tokio::test]
async fn test_standings_flattened() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/fantasy/v2/league/nfl.l.1/standings",
        json!({
            "fantasy_content": {
                "league": [
                    league_meta(),
                    {
                        "standings": [{
                            "teams": {
                                "0": {
                                    "team": [
                                        [
                                            { "team_key": "nfl.l.1.t.1" },
                                            { "team_id": "1" },
                                            { "name": "Alpha" },
                                            [],
                                            { "managers": [{ "manager": { "manager_id": "1", "nickname": "Sam" } }] }
                                        ],
                                        { "team_points": { "coverage_type": "season", "total": "1402.5" } },
                                        {
                                            "team_standings": {
                                                "rank": 1,
                                                "outcome_totals": { "wins": "9", "losses": "4", "ties": 0 }
                                            }
                                        }
                                    ]
                                },
                                "1": {
                                    "team": [
                                        [{ "team_key": "nfl.l.1.t.2" }, { "name": "Beta" }],
                                        { "team_standings": { "rank": 2 } }
                                    ]
                                },
                                "count": 2
                            }
                        }]
                    }
                ]
            }
        }),
    )
    .await;

    let yf = bearer_client(&server);
    let league = yf.league().standings("nfl.l.1").await.unwrap();

    assert_eq!(league["scoring_type"], "head");
    let standings = league["standings"].as_array().unwrap();
    assert_eq!(standings.len(), 2);

    let first = &standings[0];
    assert_eq!(first["name"], "Alpha");
    assert_eq!(first["rank"], 1);
    assert_eq!(first["outcome_totals"]["wins"], "9");
    assert_eq!(first["team_points"]["total"], "1402.5");
    assert_eq!(first["managers"][0]["nickname"], "Sam");
    assert!(first.get("team_standings").is_none());

    assert_eq!(standings[1]["team_key"], "nfl.l.1.t.2");
    assert_eq!(standings[1]["rank"], 2);
}

#[tokio::test]
async fn test_draft_results() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/fantasy/v2/league/nfl.l.1/draftresults",
        json!({
            "fantasy_content": {
                "league": [
                    league_meta(),
                    {
                        "draft_results": {
                            "0": { "draft_result": { "pick": 1, "round": 1, "team_key": "nfl.l.1.t.3", "player_key": "nfl.p.30977" } },
                            "1": { "draft_result": { "pick": 2, "round": 1, "team_key": "nfl.l.1.t.1", "player_key": "nfl.p.31002" } },
                            "count": 2
                        }
                    }
                ]
            }
        }),
    )
    .await;

    let yf = bearer_client(&server);
    let league = yf.league().draft_results("nfl.l.1").await.unwrap();

    assert_eq!(
        league["draft_results"],
        json!([
            { "pick": 1, "round": 1, "team_key": "nfl.l.1.t.3", "player_key": "nfl.p.30977" },
            { "pick": 2, "round": 1, "team_key": "nfl.l.1.t.1", "player_key": "nfl.p.31002" }
        ])
    );
}

#[tokio::test]
async fn test_transactions_empty_subtree() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/fantasy/v2/league/nfl.l.1/transactions",
        json!({ "fantasy_content": { "league": [league_meta(), { "transactions": [] }] } }),
    )
    .await;

    let yf = bearer_client(&server);
    let league = yf.league().transactions("nfl.l.1").await.unwrap();
    assert_eq!(league["transactions"], json!([]));
}

#[tokio::test]
async fn test_api_error_payload_verbatim() {
    let server = MockServer::start().await;
    let payload = json!({
        "xml:lang": "en-us",
        "yahoo:uri": "/fantasy/v2/league/nfl.l.999/settings",
        "description": "League key nfl.l.999 does not exist.",
        "detail": ""
    });
    Mock::given(method("GET"))
        .and(path("/fantasy/v2/league/nfl.l.999/settings"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": payload.clone() })))
        .mount(&server)
        .await;

    let yf = bearer_client(&server);
    match yf.league().settings("nfl.l.999").await {
        Err(YahooError::Api(body)) => assert_eq!(body, payload),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_raw_post_with_xml_body() {
    let server = MockServer::start().await;
    let xml = "<fantasy_content><transaction><type>add</type></transaction></fantasy_content>";
    Mock::given(method("POST"))
        .and(path("/fantasy/v2/league/nfl.l.1/transactions"))
        .and(header("content-type", "application/xml"))
        .and(body_string(xml))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "fantasy_content": { "ok": true } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let yf = bearer_client(&server);
    let url = format!("{}/fantasy/v2/league/nfl.l.1/transactions", server.uri());
    let tree = yf
        .api(reqwest::Method::POST, &url, Some(xml))
        .await
        .unwrap();
    assert_eq!(tree["fantasy_content"]["ok"], true);
}

#[tokio::test]
async fn test_with_callback_reports_outcome() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/fantasy/v2/league/nfl.l.1/metadata",
        json!({ "fantasy_content": { "league": [league_meta()] } }),
    )
    .await;

    let yf = bearer_client(&server);
    let seen = RefCell::new(None);
    let league = with_callback(yf.league().meta("nfl.l.1"), |outcome| {
        *seen.borrow_mut() = outcome.ok().map(|league| league["name"].clone());
    })
    .await
    .unwrap();

    assert_eq!(league["league_key"], "nfl.l.1");
    assert_eq!(seen.into_inner(), Some(json!("Office")));
}

#[tokio::test]
async fn test_timeout_surfaces_as_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let yf = YahooFantasy::builder(Credentials::new("ck", "cs"))
        .api_base_url(format!("{}/fantasy/v2", server.uri()))
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = yf.league().meta("nfl.l.1").await.unwrap_err();
    assert!(matches!(err, YahooError::Transport(_)));
}
