use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub id: i32,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: i32,
}

impl DeleteResponse {
    pub fn new(deleted: i32) -> Self {
        DeleteResponse { deleted }
    }
}
