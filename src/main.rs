// SPDX-License-Identifier: MPL-2.0
use iced_wheel::app::App;
use iced_wheel::config::{self, defaults};
use std::path::PathBuf;

fn main() -> iced::Result {
    let mut args = pico_args::Arguments::from_env();
    let wheel_path: Option<PathBuf> = args.opt_value_from_str("--wheel").unwrap_or(None);

    let definition = match wheel_path {
        Some(path) => config::load_from_path(&path),
        None => Ok(defaults::demo_wheel()),
    };
    let definition = match definition.and_then(|d| d.validate().map(|()| d)) {
        Ok(definition) => definition,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    iced::application(move || App::new(definition.clone()), App::update, App::view)
        .title(App::title)
        .subscription(App::subscription)
        .window_size((520.0, 600.0))
        .antialiasing(true)
        .run()
}
