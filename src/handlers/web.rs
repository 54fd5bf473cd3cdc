use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tokio::sync::Mutex;
use warp::http::{StatusCode, Uri};
use warp::{Filter, Rejection, Reply};

use crate::handlers::html;
use crate::models::drug::DrugRegistry;
use crate::service::schedule_store::{ScheduleStore, DATE_FORMAT};
use crate::views::navigation::{NavAction, Navigator, View};

/// One viewer session: the loaded schedule plus the navigation state every
/// request reads and updates.
pub struct Viewer {
    store: Arc<ScheduleStore>,
    registry: Arc<DrugRegistry>,
    navigator: Mutex<Navigator>,
}

impl Viewer {
    pub fn new(store: Arc<ScheduleStore>, registry: Arc<DrugRegistry>, today: NaiveDate) -> Self {
        Self {
            store,
            registry,
            navigator: Mutex::new(Navigator::new(today)),
        }
    }

    pub async fn apply(&self, action: NavAction, today: NaiveDate) {
        let mut navigator = self.navigator.lock().await;
        navigator.apply(action, today, &self.store, &self.registry);
    }

    pub async fn page(&self, today: NaiveDate) -> String {
        let navigator = self.navigator.lock().await;
        html::render_page(&navigator, &self.store, &self.registry, today).into_string()
    }

    pub async fn active_view(&self) -> View {
        self.navigator.lock().await.active()
    }
}

#[derive(Debug, Deserialize)]
struct SelectQuery {
    date: Option<String>,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

fn redirect_home() -> impl Reply {
    warp::redirect::see_other(Uri::from_static("/"))
}

async fn apply_and_redirect(viewer: Arc<Viewer>, action: NavAction) -> impl Reply {
    viewer.apply(action, local_today()).await;
    redirect_home()
}

pub fn viewer_routes(viewer: Arc<Viewer>) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let with_viewer = warp::any().map(move || viewer.clone());

    let index = warp::get()
        .and(warp::path::end())
        .and(with_viewer.clone())
        .then(|viewer: Arc<Viewer>| async move { warp::reply::html(viewer.page(local_today()).await) });

    let show = warp::get()
        .and(warp::path!("view" / String))
        .and(with_viewer.clone())
        .then(|name: String, viewer: Arc<Viewer>| async move {
            match name.parse::<View>() {
                Ok(view) => {
                    viewer.apply(NavAction::Show(view), local_today()).await;
                    Box::new(redirect_home()) as Box<dyn Reply>
                }
                Err(err) => Box::new(warp::reply::with_status(err, StatusCode::NOT_FOUND)),
            }
        });

    let prev = warp::get()
        .and(warp::path!("calendar" / "prev"))
        .and(with_viewer.clone())
        .then(|viewer: Arc<Viewer>| apply_and_redirect(viewer, NavAction::PrevMonth));

    let next = warp::get()
        .and(warp::path!("calendar" / "next"))
        .and(with_viewer.clone())
        .then(|viewer: Arc<Viewer>| apply_and_redirect(viewer, NavAction::NextMonth));

    let today = warp::get()
        .and(warp::path!("calendar" / "today"))
        .and(with_viewer.clone())
        .then(|viewer: Arc<Viewer>| apply_and_redirect(viewer, NavAction::GoToToday));

    let select = warp::get()
        .and(warp::path!("calendar" / "select"))
        .and(warp::query::<SelectQuery>())
        .and(with_viewer)
        .then(|query: SelectQuery, viewer: Arc<Viewer>| async move {
            let cell = query
                .date
                .as_deref()
                .map(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT))
                .transpose();
            match cell {
                Ok(cell) => {
                    viewer.apply(NavAction::Select(cell), local_today()).await;
                    Box::new(redirect_home()) as Box<dyn Reply>
                }
                Err(err) => {
                    tracing::warn!(date = ?query.date, error = %err, "Rejected calendar selection");
                    Box::new(warp::reply::with_status("Invalid date", StatusCode::BAD_REQUEST))
                }
            }
        });

    index
        .or(show)
        .or(prev)
        .or(next)
        .or(today)
        .or(select)
        .or(health())
}

/// Every path answers with the error page once the schedule failed to load.
pub fn error_routes(message: String) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let page = html::render_error_page(&message).into_string();
    warp::any().map(move || {
        warp::reply::with_status(warp::reply::html(page.clone()), StatusCode::SERVICE_UNAVAILABLE)
    })
}

fn health() -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::get().and(warp::path!("healthz")).map(|| "ok")
}

pub async fn serve_viewer(viewer: Arc<Viewer>, addr: SocketAddr) {
    tracing::info!(%addr, "Schedule viewer listening");
    warp::serve(viewer_routes(viewer)).run(addr).await;
}

pub async fn serve_error(message: String, addr: SocketAddr) {
    tracing::warn!(%addr, "Serving load error page");
    warp::serve(error_routes(message)).run(addr).await;
}
