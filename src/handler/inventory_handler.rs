use axum::response::IntoResponse;

pub const INVENTORY_STATUS: &str = "Inventory in stock";

// Request content is never read: every GET /inventory gets the same answer
pub async fn inventory_status() -> impl IntoResponse {
    INVENTORY_STATUS
}
