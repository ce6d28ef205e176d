//! Natural-language chat over the store.
//!
//! Messages run through the command patterns first; a parsed command
//! executes against the store and renders a text reply. Free text goes to
//! the language model when one is configured, and to a canned reply
//! otherwise.

pub mod commands;

use rust_decimal::Decimal;
use tracing::instrument;

use shopbridge_core::{BestSellerReport, FetchFilters, NewOrder, NewProduct};
use shopbridge_store::Store;

use crate::error::AppError;
use crate::services::llm::LlmClient;
use crate::services::whatsapp::WhatsAppClient;

pub use commands::ChatCommand;

const FALLBACK_REPLY: &str =
    "Sorry, I didn't understand your request. Please try asking about products or orders.";

/// Executes chat messages against the store.
#[derive(Debug, Clone)]
pub struct ChatService {
    store: Store,
    llm: Option<LlmClient>,
    whatsapp: Option<WhatsAppClient>,
}

impl ChatService {
    #[must_use]
    pub const fn new(
        store: Store,
        llm: Option<LlmClient>,
        whatsapp: Option<WhatsAppClient>,
    ) -> Self {
        Self {
            store,
            llm,
            whatsapp,
        }
    }

    /// Produce a text reply for one chat message.
    ///
    /// # Errors
    ///
    /// Store and language-model failures propagate as [`AppError`]; a failed
    /// WhatsApp notification does not (it is logged and swallowed).
    #[instrument(skip(self, message))]
    pub async fn respond(&self, message: &str) -> Result<String, AppError> {
        let Some(command) = ChatCommand::parse(message) else {
            return self.free_text_reply(message).await;
        };

        let reply = self.execute(&command).await?;
        if command.is_mutation() {
            self.notify(&reply).await;
        }
        Ok(reply)
    }

    async fn free_text_reply(&self, message: &str) -> Result<String, AppError> {
        match &self.llm {
            Some(llm) => Ok(llm.complete(message).await?),
            None => Ok(FALLBACK_REPLY.to_string()),
        }
    }

    async fn execute(&self, command: &ChatCommand) -> Result<String, AppError> {
        match command {
            ChatCommand::ListProducts => {
                let products = self.store.fetch_products(&FetchFilters::new()).await?;
                if products.is_empty() {
                    return Ok("No products found.".to_string());
                }
                Ok(products
                    .iter()
                    .map(|p| {
                        format!(
                            "#{} {} - {} ({}, {} in stock)",
                            p.id,
                            p.name,
                            format_price(p.price),
                            p.status,
                            p.stock_quantity
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            ChatCommand::ListOrders => {
                let orders = self.store.fetch_orders(&FetchFilters::new()).await?;
                if orders.is_empty() {
                    return Ok("No orders found.".to_string());
                }
                Ok(orders
                    .iter()
                    .map(|o| {
                        format!(
                            "#{} {} - ${} ({}, {})",
                            o.id, o.customer, o.total, o.status, o.date
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
            ChatCommand::CreateProduct { name, price } => {
                let input = NewProduct {
                    name: name.clone(),
                    price: *price,
                    description: String::new(),
                };
                let result = self.store.create_product(&input).await?;
                Ok(result.message)
            }
            ChatCommand::CreateOrder {
                customer,
                product_id,
                quantity,
                total,
            } => {
                let input = NewOrder {
                    customer: customer.clone(),
                    product_id: *product_id,
                    quantity: *quantity,
                    total: *total,
                };
                let result = self.store.create_order(&input).await?;
                Ok(result.message)
            }
            ChatCommand::UpdateOrderStatus { id, status } => {
                let result = self.store.update_order_status(*id, status).await?;
                Ok(result.message)
            }
            ChatCommand::DeleteProduct { id } => {
                let result = self.store.delete_product(*id).await?;
                Ok(result.message)
            }
            ChatCommand::DeleteOrder { id } => {
                let result = self.store.delete_order(*id).await?;
                Ok(result.message)
            }
            ChatCommand::BestSeller => {
                match self.store.best_selling_product_today().await? {
                    BestSellerReport::Sales {
                        product_id,
                        product_name,
                        quantity_sold,
                        total_sales,
                    } => Ok(format!(
                        "Best seller today: {product_name} (#{product_id}) - {quantity_sold} sold, ${total_sales} in sales"
                    )),
                    BestSellerReport::NoSales { message } => Ok(message),
                }
            }
            ChatCommand::OutOfStock => {
                let products = self.store.fetch_products(&FetchFilters::new()).await?;
                let depleted: Vec<_> = products
                    .iter()
                    .filter(|p| p.stock_quantity == 0)
                    .map(|p| format!("#{} {}", p.id, p.name))
                    .collect();
                if depleted.is_empty() {
                    Ok("Every product is in stock.".to_string())
                } else {
                    Ok(format!("Out of stock:\n{}", depleted.join("\n")))
                }
            }
            ChatCommand::LastOrder => {
                let orders = self.store.fetch_orders(&FetchFilters::new()).await?;
                match orders.first() {
                    Some(o) => Ok(format!(
                        "Last order: #{} {} - ${} ({}, {})",
                        o.id, o.customer, o.total, o.status, o.date
                    )),
                    None => Ok("No orders yet.".to_string()),
                }
            }
        }
    }

    /// Best-effort push of a mutation reply to WhatsApp.
    async fn notify(&self, reply: &str) {
        let Some(whatsapp) = &self.whatsapp else {
            return;
        };
        if let Err(error) = whatsapp.notify(reply).await {
            tracing::warn!(%error, "whatsapp notification failed");
        }
    }
}

fn format_price(price: Option<Decimal>) -> String {
    price.map_or_else(|| "n/a".to_string(), |p| format!("${p}"))
}
