use geostack::prelude::*;
use geostack::shape::document_to_json;
use std::sync::Arc;

const CRANE_SEED: &str = include_str!("../../../demos/seed/crane.json");
const AGNETHA: &str = "5e2aec9e0bd1ad3f3ce7a1a4";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging (set RUST_LOG=debug to see query logs)
    env_logger::init();

    println!("=== GeoStack - Getting Started ===\n");

    let store = MemoryStore::for_dataset(&CRANE);
    let loaded = store.load_extjson(CRANE_SEED)?;
    println!("Loaded {} crane documents into memory\n", loaded);

    let cranes = Repository::new(CRANE, QueryLimits::default(), Arc::new(store));

    println!("1. Trackers");
    println!("-----------");
    for tracker in cranes.parents().await? {
        println!(
            "   {} ({})",
            tracker.get_str("name").unwrap_or("?"),
            tracker.get_object_id("_id").map(|id| id.to_hex()).unwrap_or_default()
        );
    }
    println!(
        "   {} transmissions in total\n",
        count_body(cranes.count_children().await?)
    );

    println!("2. First two transmissions of Agnetha");
    println!("-------------------------------------");
    for transmission in cranes.children_by_amount(AGNETHA, "2").await? {
        println!("   {}", document_to_json(transmission));
    }
    println!();

    println!("3. Transmissions between 2017-06-05 and 2017-06-25");
    println!("---------------------------------------------------");
    let window = cranes
        .children_between(AGNETHA, "2017-06-05", "2017-06-25")
        .await?;
    println!("   {}\n", documents_to_json(window));

    println!("4. Transmissions inside a ring around Kaunas");
    println!("--------------------------------------------");
    let ring = "23.5,54.9,24.5,54.9,24.5,55.4,23.5,55.4,23.5,54.9";
    let inside = cranes.children_within(AGNETHA, ring).await?;
    println!("   {} transmissions\n", inside.len());

    println!("5. Malformed input is rejected before the store is queried");
    println!("----------------------------------------------------------");
    match cranes.children_by_amount(AGNETHA, "lots").await {
        Err(e) => println!("   {}", e),
        Ok(_) => println!("   unexpectedly accepted"),
    }

    Ok(())
}
