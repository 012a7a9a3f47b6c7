//! Weather station hardware entry point
//!
//! Brings up the RP2350 peripherals, wires them into the platform trait
//! wrappers and hands everything to the supervisor. Pinout matches the
//! deployed station: SIM800 on UART0 (GPIO 0/1), DHT22 data on GPIO 2,
//! BME280 on I2C0 (GPIO 4/5), status LED on GPIO 25.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use rp235x_hal as hal;

use hal::clocks::init_clocks_and_plls;
use hal::fugit::RateExtU32;
use hal::uart::{DataBits, StopBits, UartConfig as HalUartConfig, UartPeripheral};
use hal::Clock;

use pico_meteo::communication::sim800::Sim800Driver;
use pico_meteo::config::StationConfig;
use pico_meteo::core::supervisor::Supervisor;
use pico_meteo::devices::bme280::Bme280Driver;
use pico_meteo::devices::dht22::Dht22Driver;
use pico_meteo::platform::rp2350::{
    Rp2350Gpio, Rp2350I2c, Rp2350Timer, Rp2350Uart, Rp2350Watchdog,
};
use pico_meteo::platform::traits::{GpioMode, I2cConfig, UartConfig};

/// Tell the Boot ROM about our application
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: hal::block::ImageDef = hal::block::ImageDef::secure_exe();

/// External crystal frequency on the Pico 2 W
const XTAL_FREQ_HZ: u32 = 12_000_000;

#[hal::entry]
fn main() -> ! {
    let mut pac = hal::pac::Peripherals::take().unwrap();
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    let clocks = init_clocks_and_plls(
        XTAL_FREQ_HZ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let timer = hal::Timer::new_timer0(pac.TIMER0, &mut pac.RESETS, &clocks);
    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    // SIM800 modem link, 9600 8N1
    let uart_pins = (pins.gpio0.into_function(), pins.gpio1.into_function());
    let uart = UartPeripheral::new(pac.UART0, uart_pins, &mut pac.RESETS)
        .enable(
            HalUartConfig::new(9600.Hz(), DataBits::Eight, None, StopBits::One),
            clocks.peripheral_clock.freq(),
        )
        .unwrap();

    // BME280 sensor bus, 100 kHz standard mode
    let i2c = hal::I2C::i2c0(
        pac.I2C0,
        pins.gpio4.reconfigure(),
        pins.gpio5.reconfigure(),
        100.kHz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );

    let led = pins.gpio25.into_push_pull_output();
    let dht_pin = pins.gpio2.into_push_pull_output();

    let config = StationConfig::from_build_env();

    let modem = Sim800Driver::new(
        Rp2350Uart::new(uart, UartConfig::modem_default()),
        Rp2350Timer::new(timer),
    );
    let climate = Dht22Driver::new(
        Rp2350Gpio::new(dht_pin, GpioMode::OutputPushPull),
        Rp2350Timer::new(timer),
    );
    let pressure = Bme280Driver::new(Rp2350I2c::new(i2c, I2cConfig::default()));

    // TODO: feed the watchdog from inside the long scheduler/settling sleeps;
    // the RP2350 hardware window (~8.3 s max) is far shorter than one cycle.
    let mut supervisor = Supervisor::new(
        climate,
        pressure,
        modem,
        Rp2350Timer::new(timer),
        Rp2350Watchdog::new(watchdog),
        Rp2350Gpio::new(led, GpioMode::OutputPushPull),
        config,
    );

    if supervisor.start().is_ok() {
        supervisor.run();
    }

    // Fatal fault with the restart already requested: hold until the
    // armed watchdog pulls the plug.
    loop {
        cortex_m::asm::wfe();
    }
}
