//! Single binary JSON API for scoring table tennis matches.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, MATCH_IDLE_HOURS (in-progress matches idle this long are dropped).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockWriteGuard};
use std::time::Duration;
use table_tennis_scorer::{
    apply_score_event, finish_match, record_entered_game, set_entered_score,
    validate_entered_scores, MatchArchive, MatchCache, MatchConfiguration, MatchId, MatchLength,
    MatchProgress, MatchState, MemoryArchive, MemoryMatchCache, OpponentDirectory, OpponentId,
    PlayerId, ScoreAction, ScoreEntryEvent, ScoreEvent, Side,
};

/// Everything the handlers share. Injected through `Data`, never global.
struct AppContext {
    matches: MemoryMatchCache,
    archive: Box<dyn MatchArchive>,
    opponents: OpponentDirectory,
}

type AppState = Data<RwLock<AppContext>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// A live match plus its freshly derived progress.
#[derive(Serialize)]
struct MatchView<'a> {
    #[serde(rename = "match")]
    state: &'a MatchState,
    progress: MatchProgress,
}

impl<'a> MatchView<'a> {
    fn of(state: &'a MatchState) -> Self {
        Self {
            state,
            progress: state.progress(),
        }
    }
}

#[derive(Deserialize)]
struct CreateMatchBody {
    #[serde(default)]
    match_length: MatchLength,
    player_name: String,
    opponent_name: String,
    player_id: Option<PlayerId>,
    opponent_id: Option<OpponentId>,
}

#[derive(Deserialize)]
struct ScoreBody {
    game_index: usize,
    side: Side,
    action: ScoreAction,
}

#[derive(Deserialize)]
struct RawScoreBody {
    raw_text: String,
}

#[derive(Deserialize)]
struct EnteredScoresBody {
    score1: String,
    score2: String,
}

#[derive(Deserialize)]
struct AddOpponentBody {
    name: String,
}

#[derive(Deserialize)]
struct OpponentQuery {
    search: Option<String>,
}

/// Path segment: match id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

/// Path segments: match id and game index (e.g. /api/matches/{id}/games/{index}/entry)
#[derive(Deserialize)]
struct MatchGamePath {
    id: MatchId,
    index: usize,
}

/// Path segments: match id, game index and side (e.g. /api/matches/{id}/games/{index}/player)
#[derive(Deserialize)]
struct MatchGameSidePath {
    id: MatchId,
    index: usize,
    side: Side,
}

fn bad_request(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn no_match() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No match" }))
}

fn lock(state: &AppState) -> Result<RwLockWriteGuard<'_, AppContext>, HttpResponse> {
    state
        .write()
        .map_err(|_| HttpResponse::InternalServerError().body("lock error"))
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "table-tennis-scorer",
    })
}

/// New match setup: all games start at 0-0.
#[post("/api/matches")]
async fn api_create_match(state: AppState, body: Json<CreateMatchBody>) -> HttpResponse {
    let body = body.into_inner();
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let mut config = match MatchConfiguration::new(body.match_length, body.player_name, body.opponent_name) {
        Ok(c) => c,
        Err(e) => return bad_request(e),
    };
    if let Some(id) = body.player_id {
        config = config.with_player_id(id);
    }
    if let Some(id) = body.opponent_id {
        if let Err(e) = g.opponents.get(id) {
            return bad_request(e);
        }
        config = config.with_opponent_id(id);
    }
    let m = MatchState::new(config);
    let id = m.id;
    log::info!(
        "Match {} started: {} vs {}, best of {}",
        id,
        m.config.player_name,
        m.config.opponent_name,
        m.match_length().games()
    );
    g.matches.put(m);
    match g.matches.get(id) {
        Some(m) => HttpResponse::Ok().json(MatchView::of(m)),
        None => no_match(),
    }
}

/// Get a live match with its progress (404 if not found).
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.matches.get(path.id) {
        Some(m) => HttpResponse::Ok().json(MatchView::of(m)),
        None => no_match(),
    }
}

/// Tap to score: +1 / -1 on one side of one game.
#[post("/api/matches/{id}/score")]
async fn api_score(state: AppState, path: Path<MatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let m = match g.matches.get(path.id) {
        Some(m) => m,
        None => return no_match(),
    };
    let event = ScoreEvent {
        game_index: body.game_index,
        side: body.side,
        action: body.action,
    };
    match apply_score_event(m, event) {
        Ok(_) => HttpResponse::Ok().json(MatchView::of(m)),
        Err(e) => bad_request(e),
    }
}

/// Table view: set one side of one game from typed text.
#[put("/api/matches/{id}/games/{index}/{side}")]
async fn api_set_game_score(
    state: AppState,
    path: Path<MatchGameSidePath>,
    body: Json<RawScoreBody>,
) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let m = match g.matches.get(path.id) {
        Some(m) => m,
        None => return no_match(),
    };
    let event = ScoreEntryEvent {
        game_index: path.index,
        side: path.side,
        raw_text: body.into_inner().raw_text,
    };
    match set_entered_score(m, &event) {
        Ok(_) => HttpResponse::Ok().json(MatchView::of(m)),
        Err(e) => bad_request(e),
    }
}

/// Record a typed final score for one game. Unusual scores come back with a warning.
#[post("/api/matches/{id}/games/{index}/entry")]
async fn api_enter_game(
    state: AppState,
    path: Path<MatchGamePath>,
    body: Json<EnteredScoresBody>,
) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let m = match g.matches.get(path.id) {
        Some(m) => m,
        None => return no_match(),
    };
    match record_entered_game(m, path.index, &body.score1, &body.score2) {
        Ok(entry) => HttpResponse::Ok().json(serde_json::json!({
            "match": m,
            "progress": entry.progress,
            "winner_side": entry.game.winner,
            "winner_id": entry.winner_id,
            "display": entry.game.score.display_score(),
            "warning": entry.game.warning,
        })),
        Err(e) => bad_request(e),
    }
}

/// Live feedback for the typed score form. Never changes any match.
#[post("/api/entry/validate")]
async fn api_validate_entry(body: Json<EnteredScoresBody>) -> HttpResponse {
    let v = validate_entered_scores(&body.score1, &body.score2);
    HttpResponse::Ok().json(serde_json::json!({
        "validation": &v,
        "can_submit": v.can_submit(),
        "error": v.error_message(),
        "warning": v.warning(),
    }))
}

/// Finish: save the decided match to the archive and drop it from the live cache.
#[post("/api/matches/{id}/finish")]
async fn api_finish_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let (record, winner) = match g.matches.get(path.id) {
        Some(m) => match finish_match(m) {
            Ok(r) => {
                let winner = m.config.name_of(r.winner_side).to_string();
                (r, winner)
            }
            Err(e) => return bad_request(e),
        },
        None => return no_match(),
    };
    match g.archive.save(record) {
        Ok(id) => {
            g.matches.clear(path.id);
            log::info!("Match {} finished, won by {}", id, winner);
            HttpResponse::Ok().json(serde_json::json!({ "id": id }))
        }
        Err(e) => {
            log::warn!("Saving match {} failed: {}", path.id, e);
            bad_request(e)
        }
    }
}

/// Abandon a live match without saving.
#[delete("/api/matches/{id}")]
async fn api_abandon_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.matches.clear(path.id) {
        Some(_) => {
            log::info!("Match {} abandoned", path.id);
            HttpResponse::NoContent().finish()
        }
        None => no_match(),
    }
}

/// Saved matches, most recent first.
#[get("/api/records")]
async fn api_records(state: AppState) -> HttpResponse {
    let g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(g.archive.records())
}

/// Opponents for the setup flow, optionally filtered by `?search=`.
#[get("/api/opponents")]
async fn api_opponents(state: AppState, query: Query<OpponentQuery>) -> HttpResponse {
    let g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    let records = g.archive.records();
    HttpResponse::Ok().json(g.opponents.search(query.search.as_deref(), &records))
}

#[post("/api/opponents")]
async fn api_add_opponent(state: AppState, body: Json<AddOpponentBody>) -> HttpResponse {
    let mut g = match lock(&state) {
        Ok(guard) => guard,
        Err(resp) => return resp,
    };
    match g.opponents.add(&body.name) {
        Ok(o) => HttpResponse::Ok().json(o),
        Err(e) => bad_request(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_idle_hours() -> u64 {
    12
}

/// Idle time after which a live match is dropped. Saturates instead of overflowing.
fn idle_timeout(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let idle_hours: u64 = std::env::var("MATCH_IDLE_HOURS")
        .ok()
        .and_then(|h| h.parse().ok())
        .unwrap_or_else(default_idle_hours);
    let max_idle = idle_timeout(idle_hours);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppContext {
        matches: MemoryMatchCache::new(),
        archive: Box::new(MemoryArchive::new()),
        opponents: OpponentDirectory::new(),
    }));

    // Background task: every 30 minutes, drop live matches nobody has touched for a while
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let removed = g.matches.evict_idle(max_idle);
            if removed > 0 {
                log::info!("Cleaned up {} idle match(es) (no activity for {}h)", removed, idle_hours);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_validate_entry)
            .service(api_create_match)
            .service(api_get_match)
            .service(api_score)
            .service(api_enter_game)
            .service(api_set_game_score)
            .service(api_finish_match)
            .service(api_abandon_match)
            .service(api_records)
            .service(api_opponents)
            .service(api_add_opponent)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_timeout_saturates_on_huge_hours() {
        assert_eq!(idle_timeout(12), Duration::from_secs(12 * 3600));
        assert_eq!(idle_timeout(u64::MAX), Duration::from_secs(u64::MAX));
    }
}
