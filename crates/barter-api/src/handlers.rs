use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use barter_engine::{
    BarterError, Chain, Intent, IntentId, IntentStatus, NewIntent, Settlement, SettlementId,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub intents: usize,
    pub open_intents: usize,
    pub settlements: usize,
    pub uptime_seconds: u64,
}

#[derive(Deserialize)]
pub struct CreateIntentRequest {
    pub actor: String,
    pub offer: String,
    pub want: String,
    #[serde(default)]
    pub deadline: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct IntentView {
    pub id: u64,
    pub actor: String,
    pub offer: String,
    pub want: String,
    pub deadline: Option<DateTime<Utc>>,
    pub status: IntentStatus,
    pub is_open: bool,
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

impl From<Intent> for IntentView {
    fn from(intent: Intent) -> Self {
        IntentView {
            id: intent.id.get(),
            is_open: intent.is_open(),
            actor: intent.actor.as_str().to_string(),
            offer: intent.offer.as_str().to_string(),
            want: intent.want.as_str().to_string(),
            deadline: intent.deadline,
            status: intent.status,
            version: intent.version,
            created_at: intent.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct CancelResponse {
    pub status: String,
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct SolveResponse {
    pub chain: Vec<u64>,
}

#[derive(Deserialize)]
pub struct SettleRequest {
    pub chain: Vec<u64>,
}

#[derive(Serialize, Deserialize)]
pub struct SettlementView {
    pub id: u64,
    pub chain: Vec<u64>,
    pub created_at: DateTime<Utc>,
    pub digest: String,
}

impl From<Settlement> for SettlementView {
    fn from(settlement: Settlement) -> Self {
        SettlementView {
            id: settlement.id.get(),
            chain: chain_to_ids(&settlement.chain),
            created_at: settlement.created_at,
            digest: settlement.digest,
        }
    }
}

fn chain_to_ids(chain: &Chain) -> Vec<u64> {
    chain.ids().iter().map(|id| id.get()).collect()
}

/// Parse a client-supplied deadline.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM[:SS]` read as UTC, or a
/// bare date meaning the last second of that day (UTC). Blank means none.
pub fn parse_deadline(raw: Option<&str>) -> Result<Option<DateTime<Utc>>, BarterError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(Some(naive.and_utc()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(end_of_day) = date.and_hms_opt(23, 59, 59) {
            return Ok(Some(end_of_day.and_utc()));
        }
    }

    Err(BarterError::InvalidArgument(format!(
        "deadline {:?} is not a recognised date or timestamp",
        raw
    )))
}

/// Root endpoint
pub async fn root() -> impl IntoResponse {
    Json(MessageResponse {
        message: "API up. See /health for engine status.".to_string(),
    })
}

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let status = state.engine.status()?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        intents: status.intents,
        open_intents: status.open_intents,
        settlements: status.settlements,
        uptime_seconds: status.uptime_seconds,
    }))
}

/// Create a new intent
pub async fn create_intent(
    State(state): State<AppState>,
    payload: Result<Json<CreateIntentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<IntentView>)> {
    let Json(req) = payload?;
    let mut request = NewIntent::new(req.actor, req.offer, req.want);
    request.deadline = parse_deadline(req.deadline.as_deref())?;

    let intent = state.engine.create_intent(request)?;
    Ok((StatusCode::CREATED, Json(intent.into())))
}

/// List all intents, every status, in id order
pub async fn list_intents(State(state): State<AppState>) -> ApiResult<Json<Vec<IntentView>>> {
    let intents = state.engine.list_intents()?;
    Ok(Json(intents.into_iter().map(IntentView::from).collect()))
}

pub async fn get_intent(
    State(state): State<AppState>,
    Path(intent_id): Path<u64>,
) -> ApiResult<Json<IntentView>> {
    let intent = state.engine.get_intent(IntentId::new(intent_id))?;
    Ok(Json(intent.into()))
}

/// Cancel an open intent
pub async fn cancel_intent(
    State(state): State<AppState>,
    Path(intent_id): Path<u64>,
) -> ApiResult<Json<CancelResponse>> {
    state.engine.cancel_intent(IntentId::new(intent_id))?;
    Ok(Json(CancelResponse {
        status: "ok".to_string(),
        message: "Intent cancelled".to_string(),
    }))
}

/// Propose the shortest closing chain through an intent
pub async fn solve_chain(
    State(state): State<AppState>,
    Path(intent_id): Path<u64>,
) -> ApiResult<Json<SolveResponse>> {
    let chain = state.engine.solve(IntentId::new(intent_id))?;
    Ok(Json(SolveResponse {
        chain: chain_to_ids(&chain),
    }))
}

/// Settle a previously proposed chain
pub async fn settle_chain(
    State(state): State<AppState>,
    payload: Result<Json<SettleRequest>, JsonRejection>,
) -> ApiResult<Json<SettlementView>> {
    let Json(req) = payload?;
    let chain = Chain::new(req.chain.into_iter().map(IntentId::new).collect());
    let settlement = state.engine.settle(chain)?;
    Ok(Json(settlement.into()))
}

pub async fn list_settlements(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<SettlementView>>> {
    let settlements = state.engine.list_settlements()?;
    Ok(Json(settlements.into_iter().map(SettlementView::from).collect()))
}

pub async fn get_settlement(
    State(state): State<AppState>,
    Path(settlement_id): Path<u64>,
) -> ApiResult<Json<SettlementView>> {
    let settlement = state.engine.get_settlement(SettlementId::new(settlement_id))?;
    Ok(Json(settlement.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_deadline_formats() {
        assert_eq!(parse_deadline(None).unwrap(), None);
        assert_eq!(parse_deadline(Some("  ")).unwrap(), None);

        let rfc = parse_deadline(Some("2030-01-02T03:04:05+02:00")).unwrap().unwrap();
        assert_eq!(rfc.hour(), 1);

        let local = parse_deadline(Some("2030-01-02T03:04")).unwrap().unwrap();
        assert_eq!((local.hour(), local.minute()), (3, 4));

        let day = parse_deadline(Some("2030-01-02")).unwrap().unwrap();
        assert_eq!((day.day(), day.hour(), day.second()), (2, 23, 59));
    }

    #[test]
    fn test_parse_deadline_rejects_garbage() {
        let err = parse_deadline(Some("next tuesday")).unwrap_err();
        assert_eq!(err.kind(), "invalid_argument");
    }
}
