//! Oracle NetSuite adapter client.
//!
//! Bearer-authenticated calls against the SuiteTalk REST surface. NetSuite
//! answers 204 No Content on successful record creation; the engine maps that
//! to a local 201 "created" outcome. Every other status passes through with
//! its body unchanged.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;

use super::AdapterClient;
use crate::error::EngineError;
use crate::response::FlowResponse;

const CREATE_CUSTOMER: &str = "/services/rest/record/v1/customer";
const GET_CUSTOMER: &str = "/services/rest/record/v1/customer";
const CREATE_PURCHASE_ORDER_VENDOR_BILL: &str = "/services/rest/record/v1/vendorBill";
const GET_EXPENSE_REPORT: &str = "/services/rest/record/v1/expenseReport";

pub struct NetSuiteClient {
    base_url: String,
    correlation_id: String,
    http: reqwest::Client,
}

impl NetSuiteClient {
    pub fn new(base_url: String, correlation_id: String) -> Self {
        Self {
            base_url,
            correlation_id,
            http: reqwest::Client::new(),
        }
    }

    async fn post_record(
        &self,
        path: &str,
        payload: &Value,
        access_token: &str,
    ) -> Result<FlowResponse, EngineError> {
        let url = format!("{}{}", self.base_url, path);
        info!(
            correlation_id = %self.correlation_id,
            %url,
            "Posting record to NetSuite"
        );
        let res = self
            .http
            .post(&url)
            .bearer_auth(access_token)
            .header("Content-Type", "application/json")
            .json(payload)
            .send()
            .await?;

        let status = res.status().as_u16();
        if status == 204 {
            info!(correlation_id = %self.correlation_id, "Record inserted successfully");
            return Ok(FlowResponse::record_inserted());
        }
        let body = res.text().await?;
        info!(
            correlation_id = %self.correlation_id,
            status, "Non-204 response from NetSuite create"
        );
        Ok(FlowResponse::new(status, json!(body)))
    }

    async fn get_record(
        &self,
        path: &str,
        param: &Value,
        access_token: &str,
    ) -> Result<FlowResponse, EngineError> {
        // GET actions address a single record: the mapped payload is used as
        // the path parameter.
        let param = match param {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let url = format!("{}{}/{}", self.base_url, path, param);
        info!(
            correlation_id = %self.correlation_id,
            %url,
            "Fetching record from NetSuite"
        );
        let res = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header("Content-Type", "application/json")
            .send()
            .await?;

        let status = res.status().as_u16();
        let body = res.text().await?;
        Ok(FlowResponse::new(status, json!(body)))
    }
}

#[async_trait]
impl AdapterClient for NetSuiteClient {
    async fn invoke(
        &self,
        action: &str,
        payload: &Value,
        access_token: &str,
    ) -> Result<Option<FlowResponse>, EngineError> {
        // Explicit action registry; absence of a match is the not-found branch.
        let response = match action {
            "create_customer" => self.post_record(CREATE_CUSTOMER, payload, access_token).await?,
            "create_purchase_order_to_vendor_bill" => {
                self.post_record(CREATE_PURCHASE_ORDER_VENDOR_BILL, payload, access_token)
                    .await?
            }
            "get_customer" => self.get_record(GET_CUSTOMER, payload, access_token).await?,
            "get_expense_report" => {
                self.get_record(GET_EXPENSE_REPORT, payload, access_token).await?
            }
            _ => return Ok(None),
        };
        Ok(Some(response))
    }
}
