use axum::{extract::Path, http::StatusCode, Json};
use contracts::dashboards::common::{DashboardPage, PageInfo, PageView, RenderRequest};

use crate::dashboards;
use crate::shared::data::artifacts::get_artifacts;

fn render(request: &RenderRequest) -> PageView {
    let datasets = get_artifacts().snapshot();
    let view = dashboards::render_page(&datasets, request);

    let notices = view.notice_ids();
    if notices.is_empty() {
        tracing::info!("Dashboard: rendered '{}' ({} sections)", view.page.id(), view.sections.len());
    } else {
        tracing::info!(
            "Dashboard: rendered '{}' ({} sections, notices: {})",
            view.page.id(),
            view.sections.len(),
            notices.join(", ")
        );
    }

    view
}

/// GET /api/dashboard/pages
pub async fn list_pages() -> Json<Vec<PageInfo>> {
    Json(DashboardPage::ALL.into_iter().map(PageInfo::from).collect())
}

/// GET /api/dashboard/pages/:page
pub async fn get_page(Path(page): Path<String>) -> Result<Json<PageView>, StatusCode> {
    let page: DashboardPage = page.parse().map_err(|e| {
        tracing::warn!("Dashboard: {}", e);
        StatusCode::NOT_FOUND
    })?;

    Ok(Json(render(&RenderRequest::defaults(page))))
}

/// POST /api/dashboard/render
pub async fn render_page(Json(request): Json<RenderRequest>) -> Result<Json<PageView>, StatusCode> {
    tracing::debug!("Dashboard: render request {:?}", request);
    Ok(Json(render(&request)))
}
