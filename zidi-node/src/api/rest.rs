use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::{error, info};
use zidi_common::request::UssdRequest;
use zidi_ledger::Ledger;
use zidi_ussd::{reply, Reply};

use crate::notify::{self, SmsNotifier};

#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<Ledger>,
    pub notifier: Arc<dyn SmsNotifier>,
}

#[derive(Deserialize)]
struct ListParams {
    limit: Option<usize>,
    query: Option<String>,
}

#[derive(Serialize)]
struct AccountDto {
    phone: String,
    external_address: String,
    balance: String,
}

#[derive(Serialize)]
struct TxDto {
    entry_id: String,
    phone: String,
    external_tx_id: String,
    amount: String,
    kind: String,
    created_at: String,
}

#[derive(Serialize)]
struct ListResponse {
    transactions: Vec<TxDto>,
    total_count: u64,
}

pub async fn start_rest_api(bind: &str, port: u16, state: AppState) -> std::io::Result<()> {
    let app = router(state);

    info!("USSD callback API listening on {}:{}", bind, port);
    let listener = TcpListener::bind(format!("{}:{}", bind, port)).await?;
    axum::serve(listener, app).await
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ussd", post(ussd_callback))
        .route("/health", get(health))
        .route("/api/accounts", get(list_accounts_api))
        .route("/api/transactions", get(list_transactions_api))
        .with_state(state)
        .layer(tower_http::cors::CorsLayer::permissive())
}

async fn health() -> &'static str {
    "ok"
}

/// The dial-session gateway callback. Every handled path answers `200`
/// with a `CON `/`END ` body; a panic anywhere in the pipeline is isolated
/// by the task boundary and answered with `500` plus the fixed service
/// terminal, so the gateway's own retry policy can kick in.
async fn ussd_callback(
    State(state): State<AppState>,
    Form(req): Form<UssdRequest>,
) -> (StatusCode, String) {
    let ledger = Arc::clone(&state.ledger);
    let UssdRequest {
        session_id,
        phone_number,
        text,
    } = req;

    let task = tokio::spawn(async move {
        let outcome = zidi_ussd::dispatch(&ledger, &session_id, &phone_number, &text).await;
        (outcome, phone_number)
    });

    match task.await {
        Ok((outcome, phone)) => {
            if let Some(notice) = outcome.notice {
                notify::dispatch_notice(Arc::clone(&state.notifier), phone, notice);
            }
            (StatusCode::OK, outcome.reply.render())
        }
        Err(e) => {
            error!("ussd pipeline task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Reply::End(reply::MSG_SERVICE_ERROR.to_string()).render(),
            )
        }
    }
}

async fn list_accounts_api(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<AccountDto>> {
    let query = params.query.as_deref().unwrap_or("").to_lowercase();
    let limit = params.limit.unwrap_or(usize::MAX);

    let accounts = state
        .ledger
        .all_accounts()
        .await
        .into_iter()
        .filter(|a| query.is_empty() || a.phone.to_lowercase().contains(&query))
        .take(limit)
        .map(|a| AccountDto {
            phone: a.phone,
            external_address: a.external_address.to_string(),
            balance: format!("{:.2}", a.balance),
        })
        .collect();

    Json(accounts)
}

async fn list_transactions_api(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<ListResponse> {
    let query = params.query.as_deref().unwrap_or("").to_lowercase();
    let limit = params.limit.unwrap_or(usize::MAX);

    let mut records = Vec::new();
    for entry in state.ledger.all_entries().await {
        if !query.is_empty() {
            let match_phone = entry.phone.to_lowercase().contains(&query);
            let match_tx = entry.external_tx_id.to_lowercase().contains(&query);
            if !match_phone && !match_tx {
                continue;
            }
        }
        records.push(TxDto {
            entry_id: entry.entry_id,
            phone: entry.phone,
            external_tx_id: entry.external_tx_id,
            amount: format!("{:.2}", entry.amount),
            kind: entry.kind.as_str().to_string(),
            created_at: entry.created_at.to_rfc3339(),
        });
    }

    let total_count = records.len() as u64;
    records.truncate(limit);
    Json(ListResponse {
        transactions: records,
        total_count,
    })
}
