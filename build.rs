use std::env;

fn main() {
    // Read station provisioning from environment variables (optional).
    // These become the compile-time defaults in `config::StationConfig`.

    // Device identifier reported in every payload
    if let Ok(id) = env::var("STATION_DEVICE_ID") {
        println!("cargo:rustc-env=STATION_DEVICE_ID={}", id);
        println!(
            "cargo:warning=Using STATION_DEVICE_ID from environment: {}",
            id
        );
    } else {
        println!("cargo:rustc-env=STATION_DEVICE_ID=CCBA");
    }

    // Cellular APN for the GPRS bearer
    if let Ok(apn) = env::var("STATION_APN") {
        println!("cargo:rustc-env=STATION_APN={}", apn);
        println!("cargo:warning=Using STATION_APN from environment: {}", apn);
    } else {
        println!("cargo:rustc-env=STATION_APN=internet.tigo.bo");
    }

    // HTTP endpoint receiving the weather reports
    if let Ok(url) = env::var("STATION_URL") {
        println!("cargo:rustc-env=STATION_URL={}", url);
        println!("cargo:warning=Using STATION_URL from environment: {}", url);
    } else {
        println!(
            "cargo:rustc-env=STATION_URL=http://watchcloud.piensadiferente.net/weather/api/device/post/data"
        );
    }

    // RTC seed written to the modem at boot ("yy/MM/dd,HH:mm:ss+zz")
    if let Ok(seed) = env::var("STATION_CLOCK_SEED") {
        println!("cargo:rustc-env=STATION_CLOCK_SEED={}", seed);
        println!(
            "cargo:warning=Using STATION_CLOCK_SEED from environment: {}",
            seed
        );
    } else {
        println!("cargo:rustc-env=STATION_CLOCK_SEED=24/10/11,14:30:00+00");
    }

    // Rerun if environment variables change
    println!("cargo:rerun-if-env-changed=STATION_DEVICE_ID");
    println!("cargo:rerun-if-env-changed=STATION_APN");
    println!("cargo:rerun-if-env-changed=STATION_URL");
    println!("cargo:rerun-if-env-changed=STATION_CLOCK_SEED");
}
