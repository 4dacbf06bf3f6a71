//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the Riot API and drive the real
//! HTTP client against an on-disk frontier database.

use rift_crawler::config::{CrawlerConfig, SeedConfig};
use rift_crawler::crawler::{CrawlStep, Crawler};
use rift_crawler::storage::{Account, Counter, FrontierStore, SqliteStorage};
use rift_crawler::{CrawlerError, RiotClient};
use serde_json::json;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "RGAPI-test";

fn faker_seed() -> SeedConfig {
    SeedConfig {
        game_name: "Faker".to_string(),
        tag_line: "KR1".to_string(),
    }
}

fn client(server: &MockServer) -> RiotClient {
    RiotClient::with_base_url(API_KEY, &server.uri()).expect("Failed to build client")
}

async fn crawler_at(
    server: &MockServer,
    db_path: &Path,
) -> Result<Crawler<RiotClient, SqliteStorage>, CrawlerError> {
    let store = SqliteStorage::new(db_path).expect("Failed to open database");
    Crawler::new(client(server), store, &faker_seed(), &CrawlerConfig::default()).await
}

async fn mount_json(server: &MockServer, route: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts the Faker#KR1 seed with two recent matches, the first of which has
/// been played against a bot
async fn mount_faker_world(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/riot/account/v1/accounts/by-riot-id/Faker/KR1"))
        .and(header("X-Riot-Token", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "puuid": "P1",
            "gameName": "Faker",
            "tagLine": "KR1"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lol/match/v5/matches/by-puuid/P1/ids"))
        .and(query_param("start", "0"))
        .and(query_param("count", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["M1", "M2"])))
        .mount(server)
        .await;

    mount_json(
        server,
        "/lol/match/v5/matches/M1",
        json!({
            "metadata": {"matchId": "M1"},
            "info": {
                "participants": [
                    {"puuid": "P1", "riotIdGameName": "Faker", "riotIdTagline": "KR1"},
                    {"puuid": "P2", "riotIdName": "Chovy"},
                    {"puuid": "BOT"}
                ]
            }
        }),
    )
    .await;
}

#[tokio::test]
async fn test_seed_and_first_units() {
    let server = MockServer::start().await;
    mount_faker_world(&server).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("frontier.sqlite");
    let mut crawler = crawler_at(&server, &db_path).await.unwrap();

    let report = crawler.crawl_games(1).await.unwrap();
    assert_eq!(report.accounts_expanded, 1);
    assert_eq!(crawler.store().accounts_count().unwrap(), 1);
    assert_eq!(crawler.store().match_ids_count().unwrap(), 2);
    assert_eq!(crawler.account_cursor(), 1);
    assert_eq!(crawler.match_cursor(), 0);

    let report = crawler.crawl_games(1).await.unwrap();
    assert_eq!(report.matches_expanded, 1);
    assert_eq!(crawler.match_cursor(), 1);

    let store = crawler.store();
    assert_eq!(store.accounts_count().unwrap(), 2);
    assert_eq!(
        store.get_account("P2").unwrap(),
        Some(Account::new("P2", "Chovy", ""))
    );
    assert!(store.get_account("BOT").unwrap().is_none());
}

#[tokio::test]
async fn test_missing_match_is_pruned() {
    let server = MockServer::start().await;
    mount_faker_world(&server).await;

    // M2 is not mounted, so the mock server answers 404
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("frontier.sqlite");
    let mut crawler = crawler_at(&server, &db_path).await.unwrap();

    crawler.crawl_games(2).await.unwrap();
    assert_eq!(crawler.match_cursor(), 1);

    let step = crawler.crawl_next().await.unwrap();
    assert_eq!(step, CrawlStep::Account("P2".to_string()));

    let store = crawler.store();
    assert_eq!(store.match_ids_count().unwrap(), 1);
    assert_eq!(store.match_id_at_offset(0).unwrap().as_deref(), Some("M1"));
}

#[tokio::test]
async fn test_server_errors_exhaust_retries_without_advancing() {
    let server = MockServer::start().await;
    mount_faker_world(&server).await;

    Mock::given(method("GET"))
        .and(path("/lol/match/v5/matches/by-puuid/P2/ids"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("frontier.sqlite");
    let mut crawler = crawler_at(&server, &db_path).await.unwrap();

    // P1, then M1 (adds P2)
    let report = crawler.crawl_games(2).await.unwrap();
    assert_eq!(report.failures, 0);

    // M2 is pruned, then P2 fails every attempt
    let result = crawler.crawl_next().await;
    assert!(matches!(
        result,
        Err(CrawlerError::RetryExhausted { attempts: 3, .. })
    ));
    assert_eq!(crawler.account_cursor(), 1);
    assert_eq!(crawler.store().cursor(Counter::AccountRow).unwrap(), 1);
}

#[tokio::test]
async fn test_unknown_seed_is_fatal() {
    let server = MockServer::start().await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("frontier.sqlite");
    let result = crawler_at(&server, &db_path).await;

    match result {
        Err(e @ CrawlerError::SeedNotFound { .. }) => assert!(e.is_fatal()),
        Err(other) => panic!("expected SeedNotFound, got {}", other),
        Ok(_) => panic!("expected SeedNotFound"),
    }
}

#[tokio::test]
async fn test_resume_from_committed_cursors() {
    let server = MockServer::start().await;
    mount_faker_world(&server).await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("frontier.sqlite");

    {
        let mut crawler = crawler_at(&server, &db_path).await.unwrap();
        crawler.crawl_games(2).await.unwrap();
    }

    mount_json(
        &server,
        "/lol/match/v5/matches/M2",
        json!({
            "metadata": {"matchId": "M2"},
            "info": {"participants": [{"puuid": "P3", "riotIdGameName": "Ruler", "riotIdTagline": "KR3"}]}
        }),
    )
    .await;

    let mut crawler = crawler_at(&server, &db_path).await.unwrap();
    assert_eq!(crawler.account_cursor(), 1);
    assert_eq!(crawler.match_cursor(), 1);

    let step = crawler.crawl_next().await.unwrap();
    assert_eq!(step, CrawlStep::Match("M2".to_string()));

    // The seed is resolved only by the first crawler
    let seed_lookups = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().contains("by-riot-id"))
        .count();
    assert_eq!(seed_lookups, 1);
    assert_eq!(
        crawler.store().get_account("P3").unwrap(),
        Some(Account::new("P3", "Ruler", "KR3"))
    );
}

#[tokio::test]
async fn test_backfill_completes_accounts() {
    let server = MockServer::start().await;
    mount_faker_world(&server).await;
    mount_json(
        &server,
        "/riot/account/v1/accounts/by-puuid/P2",
        json!({"puuid": "P2", "gameName": "Chovy", "tagLine": "KR2"}),
    )
    .await;

    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("frontier.sqlite");
    let mut crawler = crawler_at(&server, &db_path).await.unwrap();
    crawler.crawl_games(2).await.unwrap();

    let report = crawler.fill_missing_data().await.unwrap();
    assert_eq!(report.updated, 1);
    assert_eq!(report.deleted, 0);

    let (_, store) = crawler.into_parts();
    assert_eq!(
        store.get_account("P2").unwrap(),
        Some(Account::new("P2", "Chovy", "KR2"))
    );
    assert!(store.incomplete_accounts().unwrap().is_empty());
}
