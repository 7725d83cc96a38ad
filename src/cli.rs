use std::time::Duration;

use crate::client::{ClientError, OrderServiceClient, PredictorClient};
use crate::config::{CliArgs, CliCommand};
use crate::models::{AnalysisResult, Order, PredictionRequest, PredictionResponse};

// ============================================================================
// Terminal front-end
// ============================================================================
//
// Holds no business logic: builds the request, calls the service and renders
// the answer as text. Any failure comes back as ClientError for the caller to
// print.
//
// ============================================================================

pub async fn run(args: &CliArgs) -> Result<String, ClientError> {
    let timeout = Duration::from_secs(args.timeout_secs);

    match &args.command {
        CliCommand::Create {
            id,
            item_type,
            quantity,
            price_per_item,
        } => {
            let client = OrderServiceClient::new(args.order_url.clone(), timeout)?;
            client
                .create(&Order {
                    id: *id,
                    item_type: item_type.clone(),
                    quantity: *quantity,
                    price_per_item: *price_per_item,
                })
                .await?;
            Ok("Order created successfully!\n".to_string())
        }
        CliCommand::List => {
            let client = OrderServiceClient::new(args.order_url.clone(), timeout)?;
            Ok(render_orders(&client.list().await?))
        }
        CliCommand::Analyze => {
            let client = OrderServiceClient::new(args.order_url.clone(), timeout)?;
            Ok(render_analysis(&client.analyze().await?))
        }
        CliCommand::Predict { item_type, quantity } => {
            let client = PredictorClient::new(args.predictor_url.clone(), timeout)?;
            let prediction = client
                .predict(&PredictionRequest {
                    item_type: item_type.clone(),
                    expected_quantity: *quantity,
                })
                .await?;
            Ok(render_prediction(&prediction))
        }
    }
}

pub fn render_orders(orders: &[Order]) -> String {
    orders
        .iter()
        .map(|o| {
            format!(
                "ID: {}, Item: {}, Quantity: {}, Price: {:?}\n",
                o.id, o.item_type, o.quantity, o.price_per_item
            )
        })
        .collect()
}

pub fn render_analysis(analysis: &[AnalysisResult]) -> String {
    analysis
        .iter()
        .map(|a| {
            format!(
                "Item: {}, Avg Quantity: {:.2}, Avg Price: {:.2}\n",
                a.item_type, a.average_quantity, a.average_price
            )
        })
        .collect()
}

pub fn render_prediction(prediction: &PredictionResponse) -> String {
    format!(
        "Item: {}, Expected Quantity: {}, Predicted Price: {:.2}\n",
        prediction.item_type, prediction.expected_quantity, prediction.predicted_price
    )
}
