// Test Server Helpers
//
// In-process control plane for the API suites, served with actix-test.
// It keeps just enough state to answer the endpoints the harness drives:
// login cookies, 401 for anonymous sessions, IMS/IUS/If-Match handling,
// parent checks on cache group deletes and regex pattern validation.

use actix_web::cookie::Cookie;
use actix_web::http::header::{IF_MATCH, IF_MODIFIED_SINCE, IF_UNMODIFIED_SINCE};
use actix_web::{web, App, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use tocheck::client::conditional::{etag, parse_http_date};

pub use actix_test::TestServer;

pub const SESSION_COOKIE: &str = "mojolicious";
pub const ADMIN_USER: &str = "admin";
pub const ADMIN_PASSWORD: &str = "twelve";
pub const STEERING_USER: &str = "steering";
pub const STEERING_PASSWORD: &str = "pa$$word";

const USERS: [(&str, &str); 2] = [(ADMIN_USER, ADMIN_PASSWORD), (STEERING_USER, STEERING_PASSWORD)];

/// Seeded types (name, table)
const TYPES: [(&str, &str); 5] = [
    ("EDGE_LOC", "cachegroup"),
    ("MID_LOC", "cachegroup"),
    ("ORG_LOC", "cachegroup"),
    ("STEERING_WEIGHT", "steering_target"),
    ("HOST_REGEXP", "regex"),
];

const DELIVERY_SERVICES: [&str; 4] = ["ds1", "ds2", "ds3", "ds4"];

struct TypeRow {
    id: i64,
    name: String,
    use_in_table: String,
}

struct DeliveryServiceRow {
    id: i64,
    xml_id: String,
}

struct CacheGroupRow {
    id: i64,
    name: String,
    short_name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    parent_id: Option<i64>,
    secondary_parent_id: Option<i64>,
    fallback_to_closest: Option<bool>,
    localization_methods: Vec<String>,
    fallbacks: Vec<String>,
    type_id: i64,
    last_updated: DateTime<Utc>,
}

struct SteeringRow {
    ds_id: i64,
    target_id: i64,
    type_id: i64,
    value: i64,
    last_updated: DateTime<Utc>,
}

struct RegexRow {
    id: i64,
    ds_id: i64,
    type_id: i64,
    set_number: i64,
    pattern: String,
}

#[derive(Default)]
pub struct PlaneState {
    next_id: i64,
    sessions: HashSet<String>,
    types: Vec<TypeRow>,
    delivery_services: Vec<DeliveryServiceRow>,
    cache_groups: Vec<CacheGroupRow>,
    steering: Vec<SteeringRow>,
    regexes: Vec<RegexRow>,
}

/// Shared server state; inspect it from tests through `lock`
pub struct ControlPlane {
    state: Mutex<PlaneState>,
}

impl ControlPlane {
    pub fn seeded() -> Self {
        let mut state = PlaneState::default();
        for (name, table) in TYPES {
            let id = state.allocate();
            state.types.push(TypeRow {
                id,
                name: name.to_string(),
                use_in_table: table.to_string(),
            });
        }
        for xml_id in DELIVERY_SERVICES {
            let id = state.allocate();
            state.delivery_services.push(DeliveryServiceRow {
                id,
                xml_id: xml_id.to_string(),
            });
        }
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, PlaneState> {
        self.state.lock().unwrap()
    }
}

impl PlaneState {
    fn allocate(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn authorized(&self, req: &HttpRequest) -> bool {
        req.cookie(SESSION_COOKIE)
            .map(|cookie| self.sessions.contains(cookie.value()))
            .unwrap_or(false)
    }

    fn type_name(&self, id: i64) -> Option<&str> {
        self.types.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }

    fn xml_id(&self, id: i64) -> Option<&str> {
        self.delivery_services
            .iter()
            .find(|ds| ds.id == id)
            .map(|ds| ds.xml_id.as_str())
    }

    fn cache_group_name(&self, id: Option<i64>) -> Option<&str> {
        let id = id?;
        self.cache_groups
            .iter()
            .find(|cg| cg.id == id)
            .map(|cg| cg.name.as_str())
    }

    pub fn cache_group_count(&self) -> usize {
        self.cache_groups.len()
    }

    pub fn steering_target_count(&self) -> usize {
        self.steering.len()
    }

    pub fn regex_patterns(&self) -> Vec<String> {
        self.regexes.iter().map(|r| r.pattern.clone()).collect()
    }

    fn render_cache_group(&self, cg: &CacheGroupRow) -> Value {
        json!({
            "id": cg.id,
            "name": cg.name,
            "shortName": cg.short_name,
            "latitude": cg.latitude,
            "longitude": cg.longitude,
            "parentCachegroupId": cg.parent_id,
            "parentCachegroupName": self.cache_group_name(cg.parent_id),
            "secondaryParentCachegroupId": cg.secondary_parent_id,
            "secondaryParentCachegroupName": self.cache_group_name(cg.secondary_parent_id),
            "fallbackToClosest": cg.fallback_to_closest,
            "localizationMethods": cg.localization_methods,
            "fallbacks": cg.fallbacks,
            "typeId": cg.type_id,
            "typeName": self.type_name(cg.type_id),
            "lastUpdated": cg.last_updated.to_rfc3339(),
        })
    }

    fn render_steering(&self, st: &SteeringRow) -> Value {
        json!({
            "deliveryService": self.xml_id(st.ds_id),
            "deliveryServiceId": st.ds_id,
            "target": self.xml_id(st.target_id),
            "targetId": st.target_id,
            "type": self.type_name(st.type_id),
            "typeId": st.type_id,
            "value": st.value,
        })
    }

    fn render_regex(&self, regex: &RegexRow) -> Value {
        json!({
            "id": regex.id,
            "type": regex.type_id,
            "typeName": self.type_name(regex.type_id),
            "setNumber": regex.set_number,
            "pattern": regex.pattern,
        })
    }
}

fn alerts(level: &str, text: &str) -> Value {
    json!({"alerts": [{"text": text, "level": level}]})
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(alerts("error", "Unauthorized, please log in."))
}

fn bad_request(text: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(alerts("error", text))
}

fn not_found(what: &str) -> HttpResponse {
    HttpResponse::NotFound().json(alerts("error", &format!("{} not found", what)))
}

fn precondition_failed() -> HttpResponse {
    HttpResponse::PreconditionFailed().json(alerts(
        "error",
        "resource was modified since the time specified by the request headers",
    ))
}

fn header<'a>(req: &'a HttpRequest, name: &actix_web::http::header::HeaderName) -> Option<&'a str> {
    req.headers().get(name).and_then(|value| value.to_str().ok())
}

/// IMS: nothing in the result set is newer than the given date
fn not_modified(req: &HttpRequest, latest: Option<DateTime<Utc>>) -> bool {
    let Some(since) = header(req, &IF_MODIFIED_SINCE).and_then(parse_http_date) else {
        return false;
    };
    match latest {
        Some(latest) => latest.timestamp() <= since.timestamp(),
        None => true,
    }
}

/// IUS or If-Match rule out a write to an entity last changed at `last_updated`
fn write_precondition_fails(req: &HttpRequest, last_updated: DateTime<Utc>) -> bool {
    if let Some(since) = header(req, &IF_UNMODIFIED_SINCE).and_then(parse_http_date) {
        if last_updated.timestamp() > since.timestamp() {
            return true;
        }
    }
    if let Some(if_match) = header(req, &IF_MATCH) {
        let current = etag(last_updated);
        let matches = if_match
            .split(',')
            .map(str::trim)
            .any(|tag| tag == "*" || tag == current);
        if !matches {
            return true;
        }
    }
    false
}

#[derive(Deserialize)]
struct LoginBody {
    u: String,
    p: String,
}

async fn login(plane: web::Data<ControlPlane>, body: web::Bytes) -> HttpResponse {
    let Ok(credentials) = serde_json::from_slice::<LoginBody>(&body) else {
        return bad_request("malformed login request");
    };

    let known = USERS
        .iter()
        .any(|(user, password)| *user == credentials.u && *password == credentials.p);
    if !known {
        return HttpResponse::Unauthorized().json(alerts("error", "Invalid username or password."));
    }

    let token = Uuid::new_v4().to_string();
    plane.lock().sessions.insert(token.clone());

    HttpResponse::Ok()
        .cookie(Cookie::build(SESSION_COOKIE, token).path("/").finish())
        .json(alerts("success", "Successfully logged in."))
}

async fn about(req: HttpRequest, plane: web::Data<ControlPlane>) -> HttpResponse {
    if !plane.lock().authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "commitHash": "1c5d3bb",
        "commits": "10865",
        "goVersion": "go1.21",
        "release": "el8",
        "name": "traffic_ops",
        "RPMVersion": "traffic_ops-8.0.0-10865.1c5d3bb.el8",
        "Version": "8.0.0"
    }))
}

async fn get_types(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }
    let response: Vec<Value> = state
        .types
        .iter()
        .filter(|t| query.get("name").map_or(true, |name| *name == t.name))
        .map(|t| json!({"id": t.id, "name": t.name, "useInTable": t.use_in_table}))
        .collect();
    HttpResponse::Ok().json(json!({ "response": response }))
}

async fn get_delivery_services(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }
    let response: Vec<Value> = state
        .delivery_services
        .iter()
        .filter(|ds| query.get("xmlId").map_or(true, |xml_id| *xml_id == ds.xml_id))
        .map(|ds| json!({"id": ds.id, "xmlId": ds.xml_id, "displayName": ds.xml_id, "active": true}))
        .collect();
    HttpResponse::Ok().json(json!({ "response": response }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheGroupInput {
    id: Option<i64>,
    name: Option<String>,
    short_name: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "parentCachegroupId")]
    parent_id: Option<i64>,
    #[serde(rename = "secondaryParentCachegroupId")]
    secondary_parent_id: Option<i64>,
    fallback_to_closest: Option<bool>,
    localization_methods: Option<Vec<String>>,
    fallbacks: Option<Vec<String>>,
    type_id: Option<i64>,
}

impl CacheGroupInput {
    fn problem(&self, state: &PlaneState, own_id: Option<i64>) -> Option<String> {
        if let Some(type_id) = self.type_id {
            if state.type_name(type_id).is_none() {
                return Some(format!("no type with id {}", type_id));
            }
        }
        for parent in [self.parent_id, self.secondary_parent_id].into_iter().flatten() {
            if state.cache_group_name(Some(parent)).is_none() || Some(parent) == own_id {
                return Some(format!("invalid parent cache group {}", parent));
            }
        }
        if let Some(name) = &self.name {
            if state
                .cache_groups
                .iter()
                .any(|cg| Some(cg.id) != own_id && cg.name == *name)
            {
                return Some(format!("cache group name '{}' already exists", name));
            }
        }
        None
    }
}

async fn get_cache_groups(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let matching: Vec<&CacheGroupRow> = state
        .cache_groups
        .iter()
        .filter(|cg| {
            query.get("id").map_or(true, |id| *id == cg.id.to_string())
                && query.get("name").map_or(true, |name| *name == cg.name)
                && query.get("shortName").map_or(true, |short| *short == cg.short_name)
                && query.get("type").map_or(true, |t| *t == cg.type_id.to_string())
        })
        .collect();

    if not_modified(&req, matching.iter().map(|cg| cg.last_updated).max()) {
        return HttpResponse::NotModified().finish();
    }

    let response: Vec<Value> = matching
        .iter()
        .map(|cg| state.render_cache_group(cg))
        .collect();
    HttpResponse::Ok().json(json!({ "response": response }))
}

async fn create_cache_group(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    body: web::Bytes,
) -> HttpResponse {
    let mut state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let input: CacheGroupInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => return bad_request(&e.to_string()),
    };
    let (Some(name), Some(short_name), Some(type_id)) =
        (input.name.clone(), input.short_name.clone(), input.type_id)
    else {
        return bad_request("'name', 'shortName' and 'typeId' are required");
    };
    if let Some(problem) = input.problem(&state, None) {
        return bad_request(&problem);
    }

    let id = state.allocate();
    let row = CacheGroupRow {
        id,
        name,
        short_name,
        latitude: input.latitude,
        longitude: input.longitude,
        parent_id: input.parent_id,
        secondary_parent_id: input.secondary_parent_id,
        fallback_to_closest: input.fallback_to_closest,
        localization_methods: input.localization_methods.unwrap_or_default(),
        fallbacks: input.fallbacks.unwrap_or_default(),
        type_id,
        last_updated: Utc::now(),
    };
    let rendered = state.render_cache_group(&row);
    state.cache_groups.push(row);

    HttpResponse::Ok().json(json!({
        "alerts": [{"text": "cache group was created.", "level": "success"}],
        "response": rendered,
    }))
}

async fn update_cache_group(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> HttpResponse {
    let mut state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let id = path.into_inner();
    let Some(index) = state.cache_groups.iter().position(|cg| cg.id == id) else {
        return not_found("cache group");
    };
    if write_precondition_fails(&req, state.cache_groups[index].last_updated) {
        return precondition_failed();
    }

    let input: CacheGroupInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => return bad_request(&e.to_string()),
    };
    if input.id.is_some_and(|body_id| body_id != id) {
        return bad_request("id in the request body does not match the path");
    }
    if let Some(problem) = input.problem(&state, Some(id)) {
        return bad_request(&problem);
    }

    {
        let cg = &mut state.cache_groups[index];
        if let Some(name) = input.name {
            cg.name = name;
        }
        if let Some(short_name) = input.short_name {
            cg.short_name = short_name;
        }
        if input.latitude.is_some() {
            cg.latitude = input.latitude;
        }
        if input.longitude.is_some() {
            cg.longitude = input.longitude;
        }
        if input.parent_id.is_some() {
            cg.parent_id = input.parent_id;
        }
        if input.secondary_parent_id.is_some() {
            cg.secondary_parent_id = input.secondary_parent_id;
        }
        if input.fallback_to_closest.is_some() {
            cg.fallback_to_closest = input.fallback_to_closest;
        }
        if let Some(methods) = input.localization_methods {
            cg.localization_methods = methods;
        }
        if let Some(fallbacks) = input.fallbacks {
            cg.fallbacks = fallbacks;
        }
        if let Some(type_id) = input.type_id {
            cg.type_id = type_id;
        }
        cg.last_updated = Utc::now();
    }

    let rendered = state.render_cache_group(&state.cache_groups[index]);
    HttpResponse::Ok().json(json!({
        "alerts": [{"text": "cache group was updated.", "level": "success"}],
        "response": rendered,
    }))
}

async fn delete_cache_group(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<i64>,
) -> HttpResponse {
    let mut state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let id = path.into_inner();
    if !state.cache_groups.iter().any(|cg| cg.id == id) {
        return not_found("cache group");
    }
    let in_use = state
        .cache_groups
        .iter()
        .any(|cg| cg.parent_id == Some(id) || cg.secondary_parent_id == Some(id));
    if in_use {
        return bad_request("cache group is in use as the parent of another cache group");
    }

    state.cache_groups.retain(|cg| cg.id != id);
    HttpResponse::Ok().json(alerts("success", "cache group was deleted."))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SteeringInput {
    target_id: Option<i64>,
    value: Option<i64>,
    type_id: Option<i64>,
}

async fn get_steering_targets(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<i64>,
) -> HttpResponse {
    let state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let ds = path.into_inner();
    if state.xml_id(ds).is_none() {
        return not_found("delivery service");
    }

    let matching: Vec<&SteeringRow> = state.steering.iter().filter(|st| st.ds_id == ds).collect();
    if not_modified(&req, matching.iter().map(|st| st.last_updated).max()) {
        return HttpResponse::NotModified().finish();
    }

    let response: Vec<Value> = matching.iter().map(|st| state.render_steering(st)).collect();
    HttpResponse::Ok().json(json!({ "response": response }))
}

async fn create_steering_target(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> HttpResponse {
    let mut state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let ds = path.into_inner();
    let input: SteeringInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => return bad_request(&e.to_string()),
    };
    let (Some(target), Some(value), Some(type_id)) = (input.target_id, input.value, input.type_id)
    else {
        return bad_request("'targetId', 'value' and 'typeId' are required");
    };
    if state.xml_id(ds).is_none() || state.xml_id(target).is_none() {
        return bad_request("no such delivery service");
    }
    if state.type_name(type_id).is_none() {
        return bad_request("no such type");
    }
    if state.steering.iter().any(|st| st.ds_id == ds && st.target_id == target) {
        return bad_request("steering target already exists");
    }

    let row = SteeringRow {
        ds_id: ds,
        target_id: target,
        type_id,
        value,
        last_updated: Utc::now(),
    };
    let rendered = state.render_steering(&row);
    state.steering.push(row);

    HttpResponse::Ok().json(json!({
        "alerts": [{"text": "steering target was created.", "level": "success"}],
        "response": rendered,
    }))
}

async fn update_steering_target(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<(i64, i64)>,
    body: web::Bytes,
) -> HttpResponse {
    let mut state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let (ds, target) = path.into_inner();
    let Some(index) = state
        .steering
        .iter()
        .position(|st| st.ds_id == ds && st.target_id == target)
    else {
        return not_found("steering target");
    };
    if write_precondition_fails(&req, state.steering[index].last_updated) {
        return precondition_failed();
    }

    let input: SteeringInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => return bad_request(&e.to_string()),
    };
    if let Some(type_id) = input.type_id {
        if state.type_name(type_id).is_none() {
            return bad_request("no such type");
        }
    }

    {
        let st = &mut state.steering[index];
        if let Some(value) = input.value {
            st.value = value;
        }
        if let Some(type_id) = input.type_id {
            st.type_id = type_id;
        }
        st.last_updated = Utc::now();
    }

    let rendered = state.render_steering(&state.steering[index]);
    HttpResponse::Ok().json(json!({
        "alerts": [{"text": "steering target was updated.", "level": "success"}],
        "response": rendered,
    }))
}

async fn delete_steering_target(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<(i64, i64)>,
) -> HttpResponse {
    let mut state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let (ds, target) = path.into_inner();
    let before = state.steering.len();
    state.steering.retain(|st| !(st.ds_id == ds && st.target_id == target));
    if state.steering.len() == before {
        return not_found("steering target");
    }
    HttpResponse::Ok().json(alerts("success", "steering target was deleted."))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegexInput {
    #[serde(rename = "type")]
    type_id: Option<i64>,
    set_number: Option<i64>,
    pattern: Option<String>,
}

async fn get_ds_regexes(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<i64>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    let state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let ds = path.into_inner();
    if state.xml_id(ds).is_none() {
        return not_found("delivery service");
    }

    let response: Vec<Value> = state
        .regexes
        .iter()
        .filter(|regex| regex.ds_id == ds)
        .filter(|regex| query.get("id").map_or(true, |id| *id == regex.id.to_string()))
        .map(|regex| state.render_regex(regex))
        .collect();
    HttpResponse::Ok().json(json!({ "response": response }))
}

async fn create_ds_regex(
    req: HttpRequest,
    plane: web::Data<ControlPlane>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> HttpResponse {
    let mut state = plane.lock();
    if !state.authorized(&req) {
        return unauthorized();
    }

    let ds = path.into_inner();
    if state.xml_id(ds).is_none() {
        return not_found("delivery service");
    }

    let input: RegexInput = match serde_json::from_slice(&body) {
        Ok(input) => input,
        Err(e) => return bad_request(&e.to_string()),
    };
    let pattern = input.pattern.unwrap_or_default();
    if pattern.is_empty() {
        return bad_request("pattern: cannot be blank");
    }
    let Some(type_id) = input.type_id.filter(|id| state.type_name(*id).is_some()) else {
        return bad_request("type: must be an existing type id");
    };

    let id = state.allocate();
    let row = RegexRow {
        id,
        ds_id: ds,
        type_id,
        set_number: input.set_number.unwrap_or(0),
        pattern,
    };
    let rendered = state.render_regex(&row);
    state.regexes.push(row);

    HttpResponse::Ok().json(json!({
        "alerts": [{"text": "Delivery service regex creation was successful.", "level": "success"}],
        "response": rendered,
    }))
}

/// Routes of the fake control plane under `/api/5.0`
pub fn configure_control_plane(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/5.0")
            .route("/user/login", web::post().to(login))
            .route("/about", web::get().to(about))
            .route("/types", web::get().to(get_types))
            .route("/deliveryservices", web::get().to(get_delivery_services))
            .service(
                web::resource("/deliveryservices/{id}/regexes")
                    .route(web::get().to(get_ds_regexes))
                    .route(web::post().to(create_ds_regex)),
            )
            .service(
                web::resource("/cachegroups")
                    .route(web::get().to(get_cache_groups))
                    .route(web::post().to(create_cache_group)),
            )
            .service(
                web::resource("/cachegroups/{id}")
                    .route(web::put().to(update_cache_group))
                    .route(web::delete().to(delete_cache_group)),
            )
            .service(
                web::resource("/steering/{ds}/targets")
                    .route(web::get().to(get_steering_targets))
                    .route(web::post().to(create_steering_target)),
            )
            .service(
                web::resource("/steering/{ds}/targets/{target}")
                    .route(web::put().to(update_steering_target))
                    .route(web::delete().to(delete_steering_target)),
            ),
    );
}

/// Spawn the fake control plane on a random port
///
/// The returned handle shares state with the server. The server stops when
/// `TestServer` drops.
pub fn spawn_control_plane() -> (TestServer, web::Data<ControlPlane>) {
    let plane = web::Data::new(ControlPlane::seeded());
    let shared = plane.clone();

    let srv = actix_test::start(move || {
        App::new()
            .app_data(shared.clone())
            .configure(configure_control_plane)
    });

    (srv, plane)
}

/// Base URL the harness should be pointed at
pub fn base_url(srv: &TestServer) -> String {
    format!("http://{}", srv.addr())
}
