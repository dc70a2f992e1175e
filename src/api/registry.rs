use actix_web::{HttpResponse, Responder, get, post, web};
use log::{debug, info, warn};
use serde_json::json;

use super::auth::{
    OP_SET_HOLDERS, OP_SET_LIQUIDITY, OP_SET_RATE, OP_SET_REWARD_WALLET, authenticate,
};
use super::models::{
    AddressResponse, AppState, HoldersResponse, OwnerResponse, RateResponse, SetAddressRequest,
    SetRateRequest,
};
use crate::registry::{Address, RATE_SCALE, Registry, RegistryError};

fn rate_response(registry: &Registry) -> RateResponse {
    RateResponse {
        rate: registry.rate(),
        raw: registry.raw_rate(),
        scale: RATE_SCALE,
    }
}

fn rejected(op: &str, err: &RegistryError) -> HttpResponse {
    warn!("{op} - rejected: {err}");
    match err {
        RegistryError::Unauthorized { .. } => HttpResponse::Forbidden().body(err.to_string()),
    }
}

/// Validate and authenticate an address mutation; yields (caller, address).
fn authorize_address(
    op: &str,
    body: &SetAddressRequest,
) -> Result<(Address, Address), HttpResponse> {
    let address = body.address.trim().to_string();
    if address.is_empty() {
        warn!("{op} - rejected: empty address");
        return Err(HttpResponse::BadRequest().body("address required"));
    }
    match authenticate(op, &json!(address), &body.pubkey, &body.signature) {
        Ok(caller) => Ok((caller, address)),
        Err(msg) => {
            warn!("{op} - unauthenticated: {msg}");
            Err(HttpResponse::Unauthorized().body(msg))
        }
    }
}

/// Registry owner identity.
#[get("/owner/")]
pub async fn get_owner(state: web::Data<AppState>) -> impl Responder {
    let registry = state.registry.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(OwnerResponse {
        owner: registry.owner().clone(),
    })
}

/// Current rate (stored value / 1000).
#[get("/rate/")]
pub async fn get_rate(state: web::Data<AppState>) -> impl Responder {
    let registry = state.registry.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(rate_response(&registry))
}

#[post("/rate/")]
pub async fn set_rate(
    state: web::Data<AppState>,
    body: web::Json<SetRateRequest>,
) -> impl Responder {
    debug!("POST /rate/ - received value={}", body.value);
    let caller = match authenticate(OP_SET_RATE, &json!(body.value), &body.pubkey, &body.signature)
    {
        Ok(caller) => caller,
        Err(msg) => {
            warn!("{OP_SET_RATE} - unauthenticated: {msg}");
            return HttpResponse::Unauthorized().body(msg);
        }
    };

    let mut registry = state.registry.lock().expect("mutex poisoned");
    match registry.set_rate(&caller, body.value) {
        Ok(changed) => {
            info!(
                "{OP_SET_RATE} - rate={} (raw {}, changed={changed})",
                registry.rate(),
                body.value
            );
            HttpResponse::Ok().json(rate_response(&registry))
        }
        Err(err) => rejected(OP_SET_RATE, &err),
    }
}

#[get("/holders/")]
pub async fn get_holders(state: web::Data<AppState>) -> impl Responder {
    let registry = state.registry.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(HoldersResponse {
        holders: registry.holders().to_vec(),
    })
}

#[post("/holders/")]
pub async fn set_holders(
    state: web::Data<AppState>,
    body: web::Json<SetAddressRequest>,
) -> impl Responder {
    let (caller, address) = match authorize_address(OP_SET_HOLDERS, &body) {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    let mut registry = state.registry.lock().expect("mutex poisoned");
    match registry.set_holders(&caller, address.clone()) {
        Ok(changed) => {
            info!(
                "{OP_SET_HOLDERS} - {address} (changed={changed}, holders={})",
                registry.holders().len()
            );
            HttpResponse::Ok().json(HoldersResponse {
                holders: registry.holders().to_vec(),
            })
        }
        Err(err) => rejected(OP_SET_HOLDERS, &err),
    }
}

#[get("/liquidity/")]
pub async fn get_liquidity(state: web::Data<AppState>) -> impl Responder {
    let registry = state.registry.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(AddressResponse {
        address: registry.liquidity().cloned(),
    })
}

#[post("/liquidity/")]
pub async fn set_liquidity(
    state: web::Data<AppState>,
    body: web::Json<SetAddressRequest>,
) -> impl Responder {
    let (caller, address) = match authorize_address(OP_SET_LIQUIDITY, &body) {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    let mut registry = state.registry.lock().expect("mutex poisoned");
    match registry.set_liquidity(&caller, address.clone()) {
        Ok(changed) => {
            info!("{OP_SET_LIQUIDITY} - {address} (changed={changed})");
            HttpResponse::Ok().json(AddressResponse {
                address: registry.liquidity().cloned(),
            })
        }
        Err(err) => rejected(OP_SET_LIQUIDITY, &err),
    }
}

#[get("/reward-wallet/")]
pub async fn get_reward_wallet(state: web::Data<AppState>) -> impl Responder {
    let registry = state.registry.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(AddressResponse {
        address: registry.reward_wallet().cloned(),
    })
}

#[post("/reward-wallet/")]
pub async fn set_reward_wallet(
    state: web::Data<AppState>,
    body: web::Json<SetAddressRequest>,
) -> impl Responder {
    let (caller, address) = match authorize_address(OP_SET_REWARD_WALLET, &body) {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    let mut registry = state.registry.lock().expect("mutex poisoned");
    match registry.set_reward_wallet(&caller, address.clone()) {
        Ok(changed) => {
            info!("{OP_SET_REWARD_WALLET} - {address} (changed={changed})");
            HttpResponse::Ok().json(AddressResponse {
                address: registry.reward_wallet().cloned(),
            })
        }
        Err(err) => rejected(OP_SET_REWARD_WALLET, &err),
    }
}

/// Whole registry in one read.
#[get("/registry/")]
pub async fn get_registry(state: web::Data<AppState>) -> impl Responder {
    let registry = state.registry.lock().expect("mutex poisoned");
    HttpResponse::Ok().json(registry.snapshot())
}
