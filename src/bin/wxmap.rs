//! Weather map downloader.
//!
//! Downloads a series of surface weather maps from the Weather Prediction Center's surface
//! analysis archive.

use std::error::Error;

use wx_map::{CmdLineArgs, Downloader, HttpFetcher, ProgressBarReporter, WxMapErr};

fn main() {
    if let Err(ref e) = run() {
        if let WxMapErr::CmdLine(clap_err) = e {
            // Prints help and version to stdout with a zero exit code.
            clap_err.exit();
        }

        println!("error: {}", e);

        let mut err: &dyn Error = e;

        while let Some(cause) = err.source() {
            println!("caused by: {}", cause);
            err = cause;
        }

        ::std::process::exit(1);
    }
}

fn run() -> Result<(), WxMapErr> {
    let app = CmdLineArgs::new_app(
        "wxmap",
        "Download a series of weather maps from the WPC surface analysis archive.",
    );

    let args = CmdLineArgs::matches(app)?;

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .init();

    let downloader =
        Downloader::new(HttpFetcher::new()?, args.map_dir()).with_wait(args.wait());

    // Individual maps that fail are reported and skipped, they do not change the exit code.
    downloader.run(args.plan(), &mut ProgressBarReporter::new())?;

    Ok(())
}
