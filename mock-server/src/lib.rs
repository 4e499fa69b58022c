//! In-memory stand-in for the Base API v2.
//!
//! Serves every collection the client knows about with the same envelopes,
//! status codes and error shapes as the real API, so client code can be
//! exercised end to end without network access or credentials.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

/// Id of the user every request is authenticated as.
pub const SELF_USER_ID: u64 = 1;

const DEFAULT_PER_PAGE: usize = 25;

/// Collections that accept create, edit and delete.
const WRITABLE: &[&str] = &[
    "contacts",
    "deals",
    "leads",
    "loss_reasons",
    "notes",
    "sources",
    "tags",
    "tasks",
];

/// Fields that must be present on create; any one of a group satisfies it.
fn required_fields(collection: &str) -> &'static [&'static str] {
    match collection {
        "contacts" => &["name", "last_name"],
        "leads" => &["last_name", "organization_name"],
        "notes" | "tasks" => &["content"],
        "deals" | "sources" | "loss_reasons" | "tags" => &["name"],
        _ => &[],
    }
}

#[derive(Debug, Default)]
pub struct Store {
    collections: HashMap<String, BTreeMap<u64, Map<String, Value>>>,
    account: Map<String, Value>,
    next_id: u64,
}

impl Store {
    /// Store seeded with one account and the authenticated user.
    pub fn seeded() -> Self {
        let now = timestamp();
        let mut store = Store {
            next_id: SELF_USER_ID + 1,
            ..Store::default()
        };
        store.account = object(json!({
            "id": 1,
            "name": "Mock Company",
            "role": "admin",
            "plan": "enterprise",
            "currency": "USD",
            "time_format": "24H",
            "timezone": "UTC",
            "phone": "+1-123-456-7890",
            "created_at": now,
            "updated_at": now,
        }));
        store.collections.entry("users".to_string()).or_default().insert(
            SELF_USER_ID,
            object(json!({
                "id": SELF_USER_ID,
                "name": "Mock User",
                "email": "mock@example.com",
                "status": "active",
                "role": "admin",
                "confirmed": true,
                "created_at": now,
                "updated_at": now,
            })),
        );
        for collection in WRITABLE {
            store.collections.entry(collection.to_string()).or_default();
        }
        store
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route(
            "/v2/{collection}",
            get(list_resources).post(create_resource),
        )
        .route(
            "/v2/{collection}/{id}",
            get(get_resource).put(update_resource).delete(delete_resource),
        )
        .route(
            "/v2/{collection}/{id}/associated_contacts/{contact_id}",
            put(upsert_associated_contact).delete(delete_associated_contact),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// A failed request rendered as the API's `{"errors": [...]}` envelope.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    resource: String,
    field: Option<String>,
    code: &'static str,
    message: String,
}

impl ApiFailure {
    fn new(status: StatusCode, resource: &str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            resource: resource.to_string(),
            field: None,
            code,
            message: message.into(),
        }
    }

    fn not_found(resource: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            resource,
            "not_found",
            "The requested resource does not exist",
        )
    }

    fn with_field(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        log::debug!("{} {}: {}", self.status, self.resource, self.code);
        let http_status = format!(
            "{} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or_default()
        );
        let body = json!({
            "errors": [{
                "error": {
                    "resource": self.resource,
                    "field": self.field,
                    "code": self.code,
                    "message": self.message,
                    "details": format!("{} {}", self.code, self.message),
                },
                "meta": {
                    "type": "error",
                    "links": {"more_info": "https://developers.getbase.com/docs/rest/articles/errors"}
                }
            }],
            "meta": {
                "type": "errors",
                "http_status": http_status,
                "logref": Uuid::new_v4().to_string(),
            }
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, ApiFailure>;

async fn list_resources(
    State(db): State<Db>,
    Path(collection): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Value>> {
    let store = db.read().await;
    let resource = singular(&collection);
    let records = store
        .collections
        .get(&collection)
        .ok_or_else(|| ApiFailure::not_found(&resource))?;

    let mut matches: Vec<&Map<String, Value>> = records
        .values()
        .filter(|record| matches_filters(record, &params))
        .collect();
    if let Some(sort_by) = params.get("sort_by") {
        sort_records(&mut matches, sort_by);
    }

    let page = parse_positive(&params, "page").unwrap_or(1);
    let per_page = parse_positive(&params, "per_page").unwrap_or(DEFAULT_PER_PAGE);
    let items: Vec<Value> = matches
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .map(|record| envelope(&resource, record))
        .collect();

    Ok(Json(json!({
        "items": items,
        "meta": {
            "type": "collection",
            "count": items.len(),
            "links": {"self": format!("/v2/{collection}?page={page}&per_page={per_page}")},
        }
    })))
}

async fn get_resource(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let store = db.read().await;
    let resource = singular(&collection);
    if id == "self" {
        return match collection.as_str() {
            "accounts" => Ok(Json(envelope("account", &store.account))),
            "users" => store
                .collections
                .get("users")
                .and_then(|users| users.get(&SELF_USER_ID))
                .map(|user| Json(envelope("user", user)))
                .ok_or_else(|| ApiFailure::not_found("user")),
            _ => Err(ApiFailure::not_found(&resource)),
        };
    }
    let id = parse_id(&resource, &id)?;
    store
        .collections
        .get(&collection)
        .and_then(|records| records.get(&id))
        .map(|record| Json(envelope(&resource, record)))
        .ok_or_else(|| ApiFailure::not_found(&resource))
}

async fn create_resource(
    State(db): State<Db>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let resource = singular(&collection);
    ensure_writable(&collection, &resource)?;
    let mut data = unwrap_data(&resource, body)?;
    validate_required(&collection, &resource, &data)?;

    let mut store = db.write().await;
    let id = store.allocate_id();
    let now = timestamp();
    data.insert("id".to_string(), json!(id));
    data.insert("creator_id".to_string(), json!(SELF_USER_ID));
    data.insert("created_at".to_string(), json!(now));
    data.insert("updated_at".to_string(), json!(now));
    if let Some(Value::Array(contacts)) = data.get_mut("associated_contacts") {
        for contact in contacts.iter_mut().filter_map(Value::as_object_mut) {
            contact.insert("creator_id".to_string(), json!(SELF_USER_ID));
        }
    }

    log::debug!("created {resource} {id}");
    let response = Json(envelope(&resource, &data));
    store
        .collections
        .entry(collection)
        .or_default()
        .insert(id, data);
    Ok(response)
}

async fn update_resource(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    let resource = singular(&collection);
    ensure_writable(&collection, &resource)?;
    let id = parse_id(&resource, &id)?;
    let changes = unwrap_data(&resource, body)?;

    let mut store = db.write().await;
    let record = store
        .collections
        .get_mut(&collection)
        .and_then(|records| records.get_mut(&id))
        .ok_or_else(|| ApiFailure::not_found(&resource))?;
    for (key, value) in changes {
        if matches!(key.as_str(), "id" | "creator_id" | "created_at") {
            continue;
        }
        record.insert(key, value);
    }
    record.insert("updated_at".to_string(), json!(timestamp()));
    Ok(Json(envelope(&resource, record)))
}

async fn delete_resource(
    State(db): State<Db>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let resource = singular(&collection);
    ensure_writable(&collection, &resource)?;
    let id = parse_id(&resource, &id)?;
    let mut store = db.write().await;
    store
        .collections
        .get_mut(&collection)
        .and_then(|records| records.remove(&id))
        .map(|_| {
            log::debug!("deleted {resource} {id}");
            StatusCode::NO_CONTENT
        })
        .ok_or_else(|| ApiFailure::not_found(&resource))
}

async fn upsert_associated_contact(
    State(db): State<Db>,
    Path((collection, id, contact_id)): Path<(String, String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<StatusCode> {
    let (deal_id, contact_id) = association_ids(&collection, &id, &contact_id)?;
    let mut store = db.write().await;
    let deal = deal_mut(&mut store, deal_id)?;
    let contacts = deal
        .entry("associated_contacts".to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(contacts) = contacts else {
        return Err(ApiFailure::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "deal",
            "invalid",
            "associated_contacts is not a list",
        ));
    };

    let role = params.get("role").cloned();
    match contacts
        .iter_mut()
        .find(|c| c.get("contact_id").and_then(Value::as_u64) == Some(contact_id))
    {
        Some(existing) => {
            if let (Some(existing), Some(role)) = (existing.as_object_mut(), role) {
                existing.insert("role".to_string(), json!(role));
            }
        }
        None => contacts.push(json!({
            "creator_id": SELF_USER_ID,
            "contact_id": contact_id,
            "role": role.unwrap_or_else(|| "involved".to_string()),
        })),
    }
    deal.insert("updated_at".to_string(), json!(timestamp()));
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_associated_contact(
    State(db): State<Db>,
    Path((collection, id, contact_id)): Path<(String, String, String)>,
) -> ApiResult<StatusCode> {
    let (deal_id, contact_id) = association_ids(&collection, &id, &contact_id)?;
    let mut store = db.write().await;
    let deal = deal_mut(&mut store, deal_id)?;
    let Some(Value::Array(contacts)) = deal.get_mut("associated_contacts") else {
        return Err(ApiFailure::not_found("associated_contact"));
    };
    let before = contacts.len();
    contacts.retain(|c| c.get("contact_id").and_then(Value::as_u64) != Some(contact_id));
    if contacts.len() == before {
        return Err(ApiFailure::not_found("associated_contact"));
    }
    Ok(StatusCode::NO_CONTENT)
}

fn association_ids(collection: &str, id: &str, contact_id: &str) -> ApiResult<(u64, u64)> {
    if collection != "deals" {
        return Err(ApiFailure::not_found(&singular(collection)));
    }
    Ok((parse_id("deal", id)?, parse_id("contact", contact_id)?))
}

fn deal_mut(store: &mut Store, deal_id: u64) -> ApiResult<&mut Map<String, Value>> {
    store
        .collections
        .get_mut("deals")
        .and_then(|deals| deals.get_mut(&deal_id))
        .ok_or_else(|| ApiFailure::not_found("deal"))
}

fn ensure_writable(collection: &str, resource: &str) -> ApiResult<()> {
    if WRITABLE.contains(&collection) {
        return Ok(());
    }
    Err(ApiFailure::new(
        StatusCode::METHOD_NOT_ALLOWED,
        resource,
        "method_not_allowed",
        "This resource is read-only",
    ))
}

fn unwrap_data(resource: &str, body: Value) -> ApiResult<Map<String, Value>> {
    match body {
        Value::Object(mut root) => match root.remove("data") {
            Some(Value::Object(data)) => Ok(data),
            _ => Err(ApiFailure::new(
                StatusCode::BAD_REQUEST,
                resource,
                "invalid_envelope",
                "Request body must be wrapped in a data envelope",
            )),
        },
        _ => Err(ApiFailure::new(
            StatusCode::BAD_REQUEST,
            resource,
            "invalid_envelope",
            "Request body must be a JSON object",
        )),
    }
}

fn validate_required(collection: &str, resource: &str, data: &Map<String, Value>) -> ApiResult<()> {
    let required = required_fields(collection);
    if required.is_empty() || required.iter().any(|field| is_present(data.get(*field))) {
        return Ok(());
    }
    Err(ApiFailure::new(
        StatusCode::UNPROCESSABLE_ENTITY,
        resource,
        "required",
        "can't be blank",
    )
    .with_field(required[0]))
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

fn matches_filters(record: &Map<String, Value>, params: &HashMap<String, String>) -> bool {
    params.iter().all(|(key, expected)| match key.as_str() {
        "page" | "per_page" | "sort_by" | "q" | "letter" => true,
        "ids" => {
            let id = record.get("id").and_then(Value::as_u64);
            expected
                .split(',')
                .filter_map(|part| part.trim().parse::<u64>().ok())
                .any(|wanted| Some(wanted) == id)
        }
        key => lookup(record, key).is_some_and(|value| scalar_eq(value, expected)),
    })
}

/// Resolves `field` or `parent[child]` against `record`.
fn lookup<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    match key.split_once('[') {
        Some((parent, rest)) => {
            let child = rest.strip_suffix(']')?;
            record.get(parent)?.get(child)
        }
        None => record.get(key),
    }
}

fn scalar_eq(value: &Value, expected: &str) -> bool {
    match value {
        Value::String(s) => s == expected,
        Value::Number(n) => n.to_string() == expected,
        Value::Bool(b) => b.to_string() == expected,
        _ => false,
    }
}

fn sort_records(records: &mut [&Map<String, Value>], sort_by: &str) {
    let keys: Vec<(&str, bool)> = sort_by
        .split(',')
        .filter(|key| !key.is_empty())
        .map(|key| match key.split_once(':') {
            Some((field, dir)) => (field, dir.eq_ignore_ascii_case("desc")),
            None => (key, false),
        })
        .collect();
    records.sort_by(|a, b| {
        keys.iter()
            .map(|(field, desc)| {
                let ord = compare_values(a.get(*field), b.get(*field));
                if *desc {
                    ord.reverse()
                } else {
                    ord
                }
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn parse_positive(params: &HashMap<String, String>, key: &str) -> Option<usize> {
    params
        .get(key)
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
}

fn parse_id(resource: &str, raw: &str) -> ApiResult<u64> {
    raw.parse().map_err(|_| {
        ApiFailure::new(StatusCode::BAD_REQUEST, resource, "invalid", "Id must be a positive integer")
            .with_field("id")
    })
}

fn envelope(resource: &str, record: &Map<String, Value>) -> Value {
    json!({"data": record, "meta": {"type": resource}})
}

/// `loss_reasons` -> `loss_reason`.
fn singular(collection: &str) -> String {
    collection
        .strip_suffix('s')
        .unwrap_or(collection)
        .to_string()
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
