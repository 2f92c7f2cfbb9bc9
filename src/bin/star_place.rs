//! Apparent place of a single star
//!
//! Reduces a J2000.0 catalog mean place to its apparent position at the
//! requested epoch and prints it in degrees and sexagesimal form.
//!
//! Usage:
//!   cargo run --bin star_place -- --epoch 2462088.69 --ra 41.05 --dec 49.2283 \
//!       --parallax 0.089 --pm-ra 0.336 --pm-dec -0.089 --rad-vel 25

use clap::{ArgAction, Parser};
use fixedstar::{CatalogMeanPlace, Epoch, FixedStarPosition, ReductionModel};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Apparent place of a fixed star
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Reduces a J2000.0 catalog mean place to the apparent place at an epoch",
    long_about = None
)]
struct Args {
    /// Observation epoch: TT Julian date, or J/B epoch such as J2028.87
    #[arg(short, long, default_value = "J2000")]
    epoch: String,

    /// Space-motion model: dyn or tri
    #[arg(short, long, default_value = "dyn")]
    model: String,

    /// Right ascension at J2000.0 in degrees
    #[arg(long, allow_hyphen_values = true)]
    ra: f64,

    /// Declination at J2000.0 in degrees
    #[arg(long, allow_hyphen_values = true)]
    dec: f64,

    /// Parallax in arcseconds
    #[arg(long, default_value_t = 0.0)]
    parallax: f64,

    /// Proper motion in RA (mu_alpha * cos delta), arcseconds per year
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pm_ra: f64,

    /// Proper motion in Dec, arcseconds per year
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pm_dec: f64,

    /// Radial velocity in km/s, positive receding
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rad_vel: f64,

    /// Print the result as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let epoch: Epoch = args.epoch.parse()?;
    let model: ReductionModel = args.model.parse()?;
    let star = CatalogMeanPlace::new(
        args.ra,
        args.dec,
        args.parallax,
        args.pm_ra,
        args.pm_dec,
        args.rad_vel,
    )?;

    let position = FixedStarPosition::with_model(epoch, model);
    let apparent = position.get(&star)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&apparent)?);
        return Ok(());
    }

    println!("Epoch:  {}", apparent.epoch());
    println!("Model:  {}", position.model());
    println!("-------------------------------------------------------");
    println!(
        "RA:     {:>14.7}°   {}",
        apparent.ra().to_degrees(),
        apparent.ra().format_hms(3)
    );
    println!(
        "Dec:    {:>14.7}°   {}",
        apparent.dec().to_degrees(),
        apparent.dec().format_dms(2)
    );

    Ok(())
}
