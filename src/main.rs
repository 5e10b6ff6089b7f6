use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use track_event::config::{LogConfig, RecorderConfig};
use track_event::{
    track_event, Completion, Instance, ProvidesTracking, Tracking, TrackingData, TrackingRecorder,
};

struct CartProps {
    page: String,
    tracking: Option<Tracking<Value>>,
}

impl ProvidesTracking for CartProps {
    type Payload = Value;

    fn tracking(&self) -> Option<&Tracking<Value>> {
        self.tracking.as_ref()
    }
}

#[derive(Debug, Default)]
struct CartState {
    items: u32,
}

type Cart = Instance<CartProps, CartState>;

#[derive(Debug, thiserror::Error)]
#[error("checkout declined: {0}")]
struct Declined(String);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log = LogConfig::default();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.default_directive)),
        )
        .init();
    tracing::info!("Tracking demo starting...");

    let recorder = TrackingRecorder::new(&RecorderConfig::default());
    let cart: Arc<Cart> = Arc::new(Instance::with_state(
        CartProps {
            page: "cart".to_string(),
            tracking: Some(recorder.sink()),
        },
        CartState::default(),
    ));

    // Sync handler: the payload sees the state after the item was added.
    let add_data: TrackingData<Cart, String, u32, Declined> =
        TrackingData::computed(|props: &CartProps, state: Option<&CartState>, sku: &String| {
            json!({
                "event": "add_item",
                "page": props.page,
                "sku": sku,
                "items": state.map(|s| s.items),
            })
        });
    let add_item = track_event(add_data)
        .wrap(|cart: &Arc<Cart>, _sku: String| {
            cart.update_state(|s| s.items += 1);
            Ok(Completion::immediate(cart.state().as_ref().map_or(0, |s| s.items)))
        })
        .named("add_item");

    add_item.call(&cart, "sku-1".to_string())?;
    add_item.call(&cart, "sku-2".to_string())?;

    // Async handler: tracked once the checkout settles, success or not.
    let checkout_data: TrackingData<Cart, bool, String, Declined> = TrackingData::settled(
        |_props: &CartProps, state: Option<&CartState>, _approve: &bool, settlement| {
            json!({
                "event": "checkout",
                "items": state.map(|s| s.items),
                "ok": !settlement.is_rejected(),
            })
        },
    );
    let checkout = track_event(checkout_data)
        .wrap(|_cart: &Arc<Cart>, approve: bool| {
            Ok(Completion::suspended(async move {
                tokio::time::sleep(Duration::from_millis(20)).await;
                if approve {
                    Ok("order-1".to_string())
                } else {
                    Err(Declined("card expired".to_string()))
                }
            }))
        })
        .named("checkout");

    let order = checkout.call(&cart, true)?.settle().await?;
    tracing::info!(%order, "checkout completed");

    if let Err(error) = checkout.call(&cart, false)?.settle().await {
        tracing::warn!(%error, "checkout failed");
    }

    for event in recorder.events() {
        tracing::info!(%event, "tracked");
    }
    let snapshot = recorder.snapshot();
    tracing::info!(recorded = snapshot.recorded, evicted = snapshot.evicted, "Tracking demo done.");

    Ok(())
}

