use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use appshot::{
    AssetPipeline, DeviceProfile, ParleyEngine, PromoScene, Theme,
    encode::write_png,
    pipeline::{FAVICON_SIZE, ICON_SIZE, SPLASH_SIZE},
};

#[derive(Parser, Debug)]
#[command(name = "appshot", version)]
struct Cli {
    /// Directory searched for font files before the system locations.
    #[arg(long, global = true)]
    font_dir: Option<PathBuf>,

    /// Output directory.
    #[arg(long, default_value = "assets", global = true)]
    out: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every asset: icons, splash, favicon, and all promos.
    All,
    /// Launcher icon PNG.
    Icon {
        #[arg(long, default_value_t = ICON_SIZE)]
        size: u32,
    },
    /// Android adaptive-icon foreground PNG.
    AdaptiveIcon {
        #[arg(long, default_value_t = ICON_SIZE)]
        size: u32,
    },
    /// Splash screen PNG.
    Splash {
        #[arg(long, default_value_t = SPLASH_SIZE.0)]
        width: u32,
        #[arg(long, default_value_t = SPLASH_SIZE.1)]
        height: u32,
    },
    /// Favicon PNG (rendered oversized, then downscaled).
    Favicon {
        #[arg(long, default_value_t = FAVICON_SIZE)]
        size: u32,
    },
    /// Promotional screenshots for one device.
    Promo {
        #[arg(long, value_enum, default_value_t = DeviceChoice::Iphone)]
        device: DeviceChoice,
        /// Single scene; all five when omitted.
        #[arg(long, value_enum)]
        scene: Option<SceneChoice>,
    },
    /// Print a scene descriptor as JSON instead of rendering it.
    DumpScene {
        #[arg(long, value_enum, default_value_t = DeviceChoice::Iphone)]
        device: DeviceChoice,
        #[arg(long, value_enum)]
        scene: SceneChoice,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DeviceChoice {
    Iphone,
    Ipad,
}

impl DeviceChoice {
    fn profile(self) -> DeviceProfile {
        match self {
            DeviceChoice::Iphone => DeviceProfile::phone(),
            DeviceChoice::Ipad => DeviceProfile::tablet(),
        }
    }

    fn dir(self) -> &'static str {
        match self {
            DeviceChoice::Iphone => "iphone",
            DeviceChoice::Ipad => "ipad",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneChoice {
    Setup,
    Score,
    Summary,
    PastGames,
    Share,
}

impl From<SceneChoice> for PromoScene {
    fn from(choice: SceneChoice) -> Self {
        match choice {
            SceneChoice::Setup => PromoScene::Setup,
            SceneChoice::Score => PromoScene::Score,
            SceneChoice::Summary => PromoScene::Summary,
            SceneChoice::PastGames => PromoScene::PastGames,
            SceneChoice::Share => PromoScene::Share,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let theme = Theme::default();

    // descriptor dumps need no fonts
    if let Command::DumpScene { device, scene } = cli.cmd {
        let desc = PromoScene::from(scene).descriptor(&device.profile(), &theme);
        println!("{}", serde_json::to_string_pretty(&desc)?);
        return Ok(());
    }

    let mut engine = ParleyEngine::load(cli.font_dir.as_deref()).context("load fonts")?;
    let mut pipeline = AssetPipeline::new(theme, &mut engine);

    match cli.cmd {
        Command::All => {
            pipeline.generate_all(&cli.out)?;
            eprintln!("wrote asset set under {}", cli.out.display());
        }
        Command::Icon { size } => {
            let path = cli.out.join("icon.png");
            write_png(&pipeline.icon(size)?, &path)?;
            eprintln!("wrote {}", path.display());
        }
        Command::AdaptiveIcon { size } => {
            let path = cli.out.join("adaptive-icon.png");
            write_png(&pipeline.adaptive_icon(size)?, &path)?;
            eprintln!("wrote {}", path.display());
        }
        Command::Splash { width, height } => {
            let path = cli.out.join("splash.png");
            write_png(&pipeline.splash(width, height)?, &path)?;
            eprintln!("wrote {}", path.display());
        }
        Command::Favicon { size } => {
            let path = cli.out.join("favicon.png");
            write_png(&pipeline.favicon(size)?, &path)?;
            eprintln!("wrote {}", path.display());
        }
        Command::Promo { device, scene } => {
            let profile = device.profile();
            let scenes: Vec<PromoScene> = match scene {
                Some(choice) => vec![choice.into()],
                None => PromoScene::ALL.to_vec(),
            };
            for scene in scenes {
                let path = cli
                    .out
                    .join(device.dir())
                    .join(format!("{}.png", scene.slug()));
                write_png(&pipeline.promo(scene, &profile)?, &path)?;
                eprintln!("wrote {}", path.display());
            }
        }
        Command::DumpScene { .. } => unreachable!("handled above"),
    }
    Ok(())
}
