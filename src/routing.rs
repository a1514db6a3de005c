//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{delete, get, post, put},
};

use crate::{
    AppState,
    beneficiary::{
        clear_beneficiaries_endpoint, create_beneficiary_endpoint, delete_beneficiary_endpoint,
    },
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    notification::{
        dismiss_send_status_endpoint, send_notifications_endpoint,
        update_notification_date_endpoint,
    },
    notifications_page::get_notifications_page,
    spreadsheet_import::import_beneficiaries,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::NOTIFICATIONS_VIEW, get(get_notifications_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::BENEFICIARIES_API,
            post(create_beneficiary_endpoint).delete(clear_beneficiaries_endpoint),
        )
        .route(
            endpoints::DELETE_BENEFICIARY,
            delete(delete_beneficiary_endpoint),
        )
        .route(endpoints::IMPORT, post(import_beneficiaries))
        .route(
            endpoints::NOTIFICATION_DATE,
            put(update_notification_date_endpoint),
        )
        .route(
            endpoints::SEND,
            post(send_notifications_endpoint).delete(dismiss_send_status_endpoint),
        )
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the notifications page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::NOTIFICATIONS_VIEW)
}
