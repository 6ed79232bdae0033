use geolocation_errors::{
    LocationError, LocationFailure, Result, location_err, sanitized, to_json_string,
};

fn clear_watch(active: &[&str], watch_id: &str) -> Result<()> {
    if !active.contains(&watch_id) {
        return Err(location_err!(
            LocationError::WatchIdNotFound,
            "clear_watch",
            "no active watch for id {}",
            sanitized!(watch_id)
        ));
    }
    Ok(())
}

fn main() {
    println!("--- Catalog ---\n");
    for variant in LocationError::ALL {
        println!("   {}", to_json_string(variant));
    }

    println!("\n--- Failure ---\n");
    match clear_watch(&["watch-1"], "watch-7") {
        Ok(()) => println!("Cleared"),
        Err(err) => {
            // SCENARIO 1: The host application
            // Receives only the catalog payload.
            println!("1. [PAYLOAD] What the host receives:");
            println!("   {}", serde_json::Value::Object(err.to_json()));

            // SCENARIO 2: The developer log
            println!("\n2. [INTERNAL LOG] What the log shows:");
            err.with_internal_log(|log| {
                println!("   Code:      {}", log.code());
                println!("   Operation: {}", log.operation());
                println!("   Details:   {}", log.details());
            });
        }
    }

    let denied = LocationFailure::permission_denied("get_current_position");
    println!("\n3. [DISPLAY] {}", denied);
}
