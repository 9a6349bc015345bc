//! JSON response envelope

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Serialize)]
pub struct Pagination {
	pub offset: usize,
	pub limit: usize,
	pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
	pub data: T,
	/// Unix timestamp (seconds) of the response
	pub time: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub pagination: Option<Pagination>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub req_id: Option<String>,
}

impl<T> ApiResponse<T> {
	pub fn new(data: T) -> Self {
		let time = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
		Self { data, time, pagination: None, req_id: None }
	}

	pub fn with_pagination(data: T, offset: usize, limit: usize, total: usize) -> Self {
		let mut res = Self::new(data);
		res.pagination = Some(Pagination { offset, limit, total });
		res
	}

	pub fn with_req_id(mut self, req_id: Option<String>) -> Self {
		self.req_id = req_id;
		self
	}
}

// vim: ts=4
