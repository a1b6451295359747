use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use dialoguer::{Input, Select};
use kassa_core::{Config, Language, Translator, DEFAULT_BASE_URL};
use std::fs;
use std::path::Path;

#[derive(Debug)]
struct InitConfig {
    language: Language,
    timezone: Tz,
    base_url: String,
    shop_id: Option<String>,
    daily_goal: i64,
}

pub fn execute(force: bool) -> Result<()> {
    let config_path = Config::config_path();
    let translator = Translator::default();
    let path_display = config_path.display().to_string();

    if config_path.exists() && !force {
        bail!(translator.format("init.exists", &[("path", &path_display)]));
    }

    if force && config_path.exists() {
        println!("⚠️  {}\n", translator.get("init.overwrite"));
    }

    println!("{}\n", translator.get("init.welcome"));

    let config = prompt_configuration(&translator)?;
    write_config(&config_path, &config)?;

    let translator = Translator::new(config.language);
    println!(
        "\n✅ {}",
        translator.format("init.saved", &[("path", &path_display)])
    );
    println!("{}", translator.get("init.next_step"));

    Ok(())
}

fn prompt_configuration(translator: &Translator) -> Result<InitConfig> {
    let languages = Language::available_languages();
    let names: Vec<&str> = languages.iter().map(|language| language.display_name()).collect();
    let selection = Select::new()
        .with_prompt(translator.get("init.language"))
        .items(&names)
        .default(0)
        .interact()?;
    let language = languages[selection];

    let base_url: String = Input::new()
        .with_prompt(translator.get("init.base_url"))
        .default(DEFAULT_BASE_URL.to_string())
        .validate_with(|input: &String| {
            if input.starts_with("http://") || input.starts_with("https://") {
                Ok(())
            } else {
                Err("URL must start with http:// or https://")
            }
        })
        .interact_text()?;

    let shop_id: String = Input::new()
        .with_prompt(translator.get("init.shop_id"))
        .allow_empty(true)
        .interact_text()?;

    let daily_goal: i64 = Input::new()
        .with_prompt(translator.get("init.daily_goal"))
        .default(20_000)
        .validate_with(|input: &i64| {
            if *input > 0 {
                Ok(())
            } else {
                Err("Goal must be greater than zero")
            }
        })
        .interact_text()?;

    let timezone: String = Input::new()
        .with_prompt(translator.get("init.timezone"))
        .default(chrono_tz::Europe::Stockholm.name().to_string())
        .validate_with(|input: &String| {
            input
                .parse::<Tz>()
                .map(|_| ())
                .map_err(|_| "Unknown IANA time zone")
        })
        .interact_text()?;

    Ok(InitConfig {
        language,
        timezone: timezone
            .parse()
            .map_err(|error| anyhow::anyhow!("{}", error))?,
        base_url: base_url.trim_end_matches('/').to_string(),
        shop_id: Some(shop_id.trim().to_string()).filter(|shop| !shop.is_empty()),
        daily_goal,
    })
}

fn render_config(config: &InitConfig) -> String {
    let shop_line = match &config.shop_id {
        Some(shop_id) => format!("shop_id = {}\n", toml::Value::from(shop_id.as_str())),
        None => String::new(),
    };

    format!(
        r#"[general]
language = "{}"
timezone = "{}"

[backend]
base_url = {}

[report]
{}daily_goal = {}
"#,
        config.language.code(),
        config.timezone.name(),
        toml::Value::from(config.base_url.as_str()),
        shop_line,
        config.daily_goal
    )
}

fn write_config(path: &Path, config: &InitConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Cannot create the configuration directory")?;
    }

    fs::write(path, render_config(config)).context("Cannot write the configuration file")?;

    Ok(())
}
