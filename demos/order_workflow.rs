//! E-commerce Order Workflow
//!
//! This example drives an order through its lifecycle with named guards and
//! actions.
//!
//! Key concepts:
//! - Declaring states and transitions with the builders
//! - Registering guards and actions by name
//! - Asynchronous guards that honor cancellation
//! - Action parameters and results
//!
//! Run with: RUST_LOG=debug cargo run --example order_workflow

use futures::FutureExt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use workflow_fsm::builder::{SchemaBuilder, TransitionBuilder};
use workflow_fsm::core::{find_param, Object, Param};
use workflow_fsm::definition::MachineDefinition;
use workflow_fsm::machine::Machine;
use workflow_fsm::registry::{Action, Condition};
use workflow_fsm::CancellationToken;

#[derive(Debug)]
struct Order {
    id: u64,
    status: String,
    items: Vec<String>,
    total: u64,
    address: Option<String>,
    notifications: Vec<String>,
}

impl Object for Order {
    fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

fn order_definition() -> anyhow::Result<MachineDefinition<Order>> {
    let schema = SchemaBuilder::new()
        .name("order")
        .initial("draft")
        .states(["draft", "paid", "shipped", "delivered", "cancelled"])
        .final_state("delivered")
        .final_state("cancelled")
        .transition(
            TransitionBuilder::new()
                .from("draft")
                .to("paid")
                .on("pay")
                .guard("hasItems")
                .action("chargeCard")
                .action_with("notifyCustomer", vec![Param::new("template", "payment_received")]),
        )?
        .transition(
            TransitionBuilder::new()
                .from("paid")
                .to("shipped")
                .on("ship")
                .guard("hasAddress")
                .guard("addressVerified")
                .action_with("notifyCustomer", vec![Param::new("template", "order_shipped")]),
        )?
        .transition(TransitionBuilder::new().from("shipped").to("delivered").on("deliver"))?
        .transition(TransitionBuilder::new().from("draft").to("cancelled").on("cancel"))?
        .build()?;

    let definition = MachineDefinition::builder(schema)
        .condition(Condition::from_fn("hasItems", |order: &Order| {
            !order.items.is_empty() && order.total > 0
        }))
        .condition(Condition::from_fn("hasAddress", |order: &Order| {
            order.address.is_some()
        }))
        // Stands in for a call to an external address service.
        .condition(Condition::new("addressVerified", |cancel, order: &Order| {
            async move {
                tokio::select! {
                    _ = cancel.cancelled() => false,
                    _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                        order.address.as_deref().is_some_and(|a| !a.is_empty())
                    }
                }
            }
            .boxed()
        }))
        .action(Action::from_fn("chargeCard", |order: &mut Order, _params, _prior| {
            tracing::info!(order = order.id, amount = order.total, "card charged");
            Ok(())
        }))
        .action(Action::from_fn("notifyCustomer", |order: &mut Order, params, prior| {
            let template = find_param(params, "template")
                .ok_or_else(|| anyhow::anyhow!("notifyCustomer needs a template"))?
                .value_as::<String>()?;
            if prior.iter().any(|r| !r.is_ok()) {
                anyhow::bail!("not sending '{template}' after a failed action");
            }
            order.notifications.push(template);
            Ok(())
        }))
        .strict_actions(true)
        .build()?;

    Ok(definition)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Order Workflow Example ===\n");

    let machine = Machine::new(CancellationToken::new(), Arc::new(order_definition()?));

    let mut order = Order {
        id: 42,
        status: String::new(),
        items: vec![],
        total: 0,
        address: None,
        notifications: vec![],
    };
    machine.start(&mut order);
    println!("Order {} starts in '{}'", order.id, order.status());

    // Empty cart: the guard denies payment.
    match machine.send_event(&mut order, "pay").await {
        Ok(_) => println!("unexpected: empty order was paid"),
        Err(e) => println!("Pay rejected: {e}"),
    }

    order.items.push("keyboard".into());
    order.total = 8900;
    let results = machine.send_event(&mut order, "pay").await?;
    println!("Order paid, {} actions ran:", results.len());
    for result in &results {
        println!("  - {} ({})", result.name, if result.is_ok() { "ok" } else { "failed" });
    }

    println!("Can ship without an address? {}", machine.can(&order, "ship").await);
    order.address = Some("221B Baker Street".into());

    let available = machine.available_transitions(&order, None).await?;
    for transition in &available {
        println!("Available: {transition}");
    }

    machine.send_event(&mut order, "ship").await?;
    machine.send_event(&mut order, "deliver").await?;

    println!("\nFinal state: {}", order.status());
    println!("Is final: {}", machine.is_in_final_state(&order));
    println!("Notifications: {:?}", order.notifications);

    Ok(())
}
