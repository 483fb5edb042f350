use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::Form;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;

use podium_types::{Entry, EntryId, EntryView, Kind, KindFilter, Submission};

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use crate::upstream::UpstreamReply;

/// Query fields shared by the list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Viewer identity used to annotate `voted`; blank means guest.
    #[serde(default)]
    pub author: String,
    /// Kind constraint: `"q"`, `"c"`, or absent for everything.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Form fields accepted by `POST /add`.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub text: String,
    /// Blank or unrecognized values are stored as comments.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Form fields accepted by `POST /vote`.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub author: String,
    pub id: Option<String>,
    pub vote: Option<String>,
}

/// Query fields for the delegation endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct TextParams {
    #[serde(default)]
    pub text: String,
}

/// GET /all — every entry, annotated for the requesting author.
pub async fn list_all(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ServerResult<Json<Vec<EntryView>>> {
    list_since(&state, params, DateTime::UNIX_EPOCH).await
}

/// GET /recent — entries created inside the configured window.
pub async fn list_recent(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ServerResult<Json<Vec<EntryView>>> {
    let since = state.config.recent_cutoff(Utc::now());
    list_since(&state, params, since).await
}

/// GET /top — the highest-scored entries, up to the configured limit.
pub async fn list_top(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> ServerResult<Json<Vec<EntryView>>> {
    let filter = KindFilter::parse(params.kind.as_deref());
    let entries = state
        .stream
        .list_by_score(filter, Some(state.config.top_limit))
        .await?;
    Ok(Json(views_for(&entries, &params.author)))
}

async fn list_since(
    state: &AppState,
    params: ListParams,
    since: DateTime<Utc>,
) -> ServerResult<Json<Vec<EntryView>>> {
    let filter = KindFilter::parse(params.kind.as_deref());
    let entries = state.stream.list_by_recency(filter, since).await?;
    Ok(Json(views_for(&entries, &params.author)))
}

fn views_for(entries: &[Entry], viewer: &str) -> Vec<EntryView> {
    entries
        .iter()
        .map(|e| EntryView::for_viewer(e, viewer))
        .collect()
}

/// POST /add — admit a new entry; responds with its id as plain text.
///
/// Peer fan-out happens off the request path.
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddForm>,
) -> ServerResult<String> {
    let kind = parse_add_kind(form.kind.as_deref());
    let submission = Submission::new(form.author, form.text, kind);
    let entry = state.stream.add(submission).await?;

    let upstream = state.upstream.clone();
    let forwarded = entry.clone();
    tokio::spawn(async move { upstream.broadcast(&forwarded).await });

    Ok(entry.id.to_string())
}

/// A blank or unrecognized submission kind is stored as a comment.
fn parse_add_kind(value: Option<&str>) -> Kind {
    value.and_then(|s| s.parse().ok()).unwrap_or(Kind::Comment)
}

/// POST /vote — apply a vote; responds with the post-vote score as plain
/// text.
///
/// A malformed `id` is rejected outright; a malformed `vote` falls back to
/// magnitude 1.
pub async fn vote(
    State(state): State<AppState>,
    Form(form): Form<VoteForm>,
) -> ServerResult<String> {
    let raw_id = form
        .id
        .ok_or_else(|| ServerError::InvalidId("<missing>".into()))?;
    let id: EntryId = raw_id
        .parse()
        .map_err(|_| ServerError::InvalidId(raw_id.clone()))?;
    let magnitude = form
        .vote
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1);

    let score = state.stream.vote(id, form.author, magnitude).await?;
    Ok(score.to_string())
}

/// GET /similar — relay to the similarity service.
pub async fn similar(
    State(state): State<AppState>,
    Query(params): Query<TextParams>,
) -> ServerResult<(StatusCode, String)> {
    relay_reply(state.upstream.similar(&params.text).await?)
}

/// GET /sentiment — relay to the sentiment service.
pub async fn sentiment(
    State(state): State<AppState>,
    Query(params): Query<TextParams>,
) -> ServerResult<(StatusCode, String)> {
    relay_reply(state.upstream.sentiment(&params.text).await?)
}

fn relay_reply(reply: UpstreamReply) -> ServerResult<(StatusCode, String)> {
    let status =
        StatusCode::from_u16(reply.status).map_err(|e| ServerError::Internal(e.to_string()))?;
    Ok((status, reply.body))
}

/// GET /health — liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
