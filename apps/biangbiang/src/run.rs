use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bb_app::{Action, Mode, SizeF, camera, text_mode, throttle::FrameThrottle};
use bb_hanzi::{ChineseVariant, PinyinConverter};
use bb_overlay::{EstimatedMeasure, LayoutParams, OverlayItem, layout_overlay};
use bb_settings::{ConfigManager, Settings, TranslatorProvider};
use bb_translate::Translator;
use tokio::sync::mpsc;

use crate::app::{App, Job, Notice};
use crate::capture::load_image;
use crate::cli::{
    Cli, Command, ConversionArgs, CopyField, LiveArgs, ScanArgs, SettingsCommand, TextArgs,
    WatchArgs,
};
use crate::clipboard::{SystemClipboard, TextClipboard};
use crate::error::{AppError, AppResult};
use crate::report::{TextReport, box_reports, render_boxes, render_layout};
use crate::system::OcrManager;

/// Services the jobs queued by [`App`] run against.
pub struct Services {
    pub translator: Option<Arc<dyn Translator>>,
    pub variant: ChineseVariant,
    pub language: String,
    pub ocr: Option<OcrManager>,
}

impl Services {
    pub fn from_settings(settings: &Settings, translate: bool) -> Self {
        let translator = if translate && settings.translator.provider != TranslatorProvider::None {
            match bb_translate::build_translator(&settings.translator) {
                Ok(t) => Some(t),
                Err(e) => {
                    log::warn!("translation unavailable: {e}");
                    None
                }
            }
        } else {
            None
        };
        Self {
            translator,
            variant: settings.chinese_variant,
            language: settings.translation_language.clone(),
            ocr: None,
        }
    }

    pub fn with_ocr(mut self, ocr: OcrManager) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn translates(&self) -> bool {
        self.translator.is_some()
    }

    async fn run_job(&self, app: &App, job: Job) -> Option<Action> {
        match job {
            Job::Translate { request_id, text } => {
                let translator = self.translator.as_ref()?;
                let result =
                    bb_translate::translate(translator.as_ref(), &text, self.variant, &self.language)
                        .await
                        .map_err(|e| e.to_string());
                if let Err(e) = &result {
                    log::warn!("translation {request_id} failed: {e}");
                }
                Some(Action::Text(text_mode::Action::TranslationFinished {
                    request_id,
                    result,
                }))
            }
            Job::RecognizeCapturedImage { request_id } => {
                let (Some(ocr), Some(img)) = (&self.ocr, app.captured_image()) else {
                    return Some(Action::Camera(camera::Action::CaptureFailed { request_id }));
                };
                match ocr.recognize_hanzi_blocking(img, app.converter()).await {
                    Ok(frame) => Some(Action::Camera(camera::Action::CapturedImageRecognized {
                        request_id,
                        boxes: frame.boxes,
                    })),
                    Err(e) => {
                        log::error!("{e}");
                        Some(Action::Camera(camera::Action::CaptureFailed { request_id }))
                    }
                }
            }
        }
    }
}

/// Run queued jobs to completion, including jobs they cause in turn.
pub async fn complete_jobs(app: &mut App, services: &Services) {
    loop {
        let jobs = app.take_jobs();
        if jobs.is_empty() {
            break;
        }
        for job in jobs {
            if let Some(action) = services.run_job(app, job).await {
                app.dispatch(action);
            }
        }
    }
}

fn apply_conversion_args(settings: &mut Settings, args: &ConversionArgs) -> AppResult<()> {
    if let Some(tone) = args.tone {
        settings.tone_style = tone;
    }
    if let Some(variant) = args.variant {
        settings.chinese_variant = variant;
    }
    if let Some(language) = &args.language {
        settings.translation_language = bb_translate::normalize_language(language)?;
    }
    Ok(())
}

fn print_notices(app: &mut App) {
    for notice in app.take_notices() {
        match notice {
            Notice::Copied(text) => eprintln!("Text copied: {text}"),
            Notice::CopyFailed(e) => eprintln!("Copy failed: {e}"),
            Notice::OutputsCleared => log::debug!("outputs cleared"),
            Notice::PinyinToggled(show) => log::debug!("show pinyin: {show}"),
        }
    }
}

/// Feed `text` through text mode and wait for its results.
pub async fn process_text(app: &mut App, services: &Services, text: String, debounce: Duration) {
    app.dispatch(Action::SwitchMode(Mode::Text));
    let now = Instant::now();
    app.dispatch(Action::Text(text_mode::Action::Paste { text, now }));
    app.tick(now + debounce);
    complete_jobs(app, services).await;
}

fn read_input(args: &TextArgs) -> AppResult<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if args.paste {
        return SystemClipboard::new()
            .get_text()?
            .ok_or_else(|| AppError::Input("clipboard has no text".into()));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

async fn run_text(config: &ConfigManager, args: TextArgs) -> AppResult<()> {
    let mut settings = config.get();
    apply_conversion_args(&mut settings, &args.conversion)?;
    let input = read_input(&args)?;
    if input.trim().is_empty() {
        return Err(AppError::Input("no text given".into()));
    }

    let services = Services::from_settings(&settings, !args.conversion.no_translate);
    let clipboard = match args.copy {
        Some(_) => SystemClipboard::for_copy(args.hold_secs),
        None => SystemClipboard::new(),
    };
    let mut app = App::new(&settings, Box::new(clipboard)).with_translation(services.translates());
    process_text(
        &mut app,
        &services,
        input,
        Duration::from_millis(settings.debounce_ms),
    )
    .await;

    let mut report =
        TextReport::from_app(&app, services.translates(), &settings.translation_language);
    if let Some(variant) = args.to {
        report = report.with_conversion(variant)?;
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?);
    } else {
        print!("{}", report.render());
    }

    if let Some(field) = args.copy {
        let field = match field {
            CopyField::Pinyin => text_mode::TextField::Pinyin,
            CopyField::Translation => text_mode::TextField::Translation,
        };
        app.dispatch(Action::Text(text_mode::Action::Copy(field)));
    }
    print_notices(&mut app);
    Ok(())
}

async fn run_watch(config: &ConfigManager, args: WatchArgs) -> AppResult<()> {
    let mut settings = config.get();
    apply_conversion_args(&mut settings, &args.conversion)?;
    let services = Arc::new(Services::from_settings(&settings, !args.conversion.no_translate));

    let mut app = App::new(&settings, Box::new(SystemClipboard::new()))
        .with_translation(services.translates());
    app.dispatch(Action::SwitchMode(Mode::Text));
    let mut clipboard = SystemClipboard::new();
    let mut last_clip: Option<String> = None;
    let mut shown = (String::new(), String::new());

    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut poll = tokio::time::interval(Duration::from_millis(args.poll_ms.max(10)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    eprintln!("Watching the clipboard for Chinese text. Press Ctrl-C to stop.");
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            Some(action) = rx.recv() => app.dispatch(action),
            _ = poll.tick() => {
                match clipboard.get_text() {
                    Ok(Some(text)) if last_clip.as_ref() != Some(&text) => {
                        last_clip = Some(text.clone());
                        if bb_hanzi::contains_hanzi(&text) {
                            app.dispatch(Action::Text(text_mode::Action::Paste {
                                text,
                                now: Instant::now(),
                            }));
                        }
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("{e}"),
                }
                app.tick(Instant::now());

                for job in app.take_jobs() {
                    let services = Arc::clone(&services);
                    let tx = tx.clone();
                    // Only translations are queued in text mode.
                    if let Job::Translate { request_id, text } = job {
                        tokio::spawn(async move {
                            let Some(translator) = services.translator.as_ref() else { return };
                            let result = bb_translate::translate(
                                translator.as_ref(),
                                &text,
                                services.variant,
                                &services.language,
                            )
                            .await
                            .map_err(|e| e.to_string());
                            let _ = tx.send(Action::Text(text_mode::Action::TranslationFinished {
                                request_id,
                                result,
                            }));
                        });
                    }
                }
            }
        }

        let text = app.core().text();
        if !text.is_translating() && (text.pinyin(), text.translation()) != (&shown.0[..], &shown.1[..]) {
            shown = (text.pinyin().to_string(), text.translation().to_string());
            if !shown.0.is_empty() {
                let report = TextReport::from_app(&app, services.translates(), &settings.translation_language);
                println!("{}", report.render());
            }
        }
        print_notices(&mut app);
    }
    Ok(())
}

fn layout_params(image_size: SizeF, view_size: SizeF, is_live: bool, show_pinyin: bool) -> LayoutParams {
    LayoutParams {
        image_size,
        view_size,
        is_live,
        show_pinyin,
    }
}

async fn run_scan(config: &ConfigManager, args: ScanArgs) -> AppResult<()> {
    let mut settings = config.get();
    apply_conversion_args(&mut settings, &args.conversion)?;
    let img = load_image(&args.image)?;

    let ocr = OcrManager::from_settings(&settings);
    ocr.start_sync()?;
    let services = Services::from_settings(&settings, !args.conversion.no_translate).with_ocr(ocr.clone());

    let mut app = App::new(&settings, Box::new(SystemClipboard::new()))
        .with_translation(services.translates());
    app.dispatch(Action::SwitchMode(Mode::Camera));
    if args.hanzi && app.core().camera().show_pinyin() {
        app.dispatch(Action::Camera(camera::Action::TogglePinyin));
    }

    app.capture_image(img);
    complete_jobs(&mut app, &services).await;
    let img = match app.captured_image() {
        Some(img) if app.core().camera().has_captured_image() => img,
        _ => return Err(AppError::Ocr("recognition did not complete".into())),
    };

    let show_pinyin = app.core().camera().show_pinyin();
    let image_size = SizeF::from((img.width(), img.height()));
    let items: Vec<OverlayItem> = layout_overlay(
        app.visible_boxes(),
        &layout_params(image_size, image_size, false, show_pinyin),
        &EstimatedMeasure,
    );

    if let Some((x, y)) = args.tap {
        match bb_overlay::hit_test(&items, x, y) {
            Some(i) => app.dispatch(Action::Camera(camera::Action::BoxTapped {
                index: items[i].index,
                now: Instant::now(),
            })),
            None => eprintln!("No Hanzi at {x},{y}"),
        }
    }

    if let Some(out) = &args.render {
        let rendered = bb_overlay::render_overlay(&img, &items, app.core().camera().highlighted())?;
        bb_overlay::save_png(&rendered, out)?;
        eprintln!("Overlay written to {}", out.display());
    }

    if args.json {
        let json = serde_json::to_string_pretty(&box_reports(app.visible_boxes()))
            .map_err(anyhow::Error::from)?;
        println!("{json}");
    } else {
        print!("{}", render_boxes(app.visible_boxes(), show_pinyin));
    }
    print_notices(&mut app);

    if args.lines {
        let lines = ocr.recognize_lines_blocking(Arc::clone(&img)).await?;
        let outcome = bb_ocr::summarize_outcome(&lines);
        if outcome.has_results() {
            process_text(
                &mut app,
                &services,
                outcome.text().to_string(),
                Duration::from_millis(settings.debounce_ms),
            )
            .await;
            let report =
                TextReport::from_app(&app, services.translates(), &settings.translation_language);
            println!();
            print!("{}", report.render());
        } else {
            eprintln!("No text lines recognized");
        }
    }
    Ok(())
}

async fn run_live(config: &ConfigManager, args: LiveArgs) -> AppResult<()> {
    let mut settings = config.get();
    if let Some(tone) = args.tone {
        settings.tone_style = tone;
    }
    let interval = Duration::from_millis(args.interval_ms.unwrap_or(settings.live_interval_ms));

    let ocr = OcrManager::from_settings(&settings);
    // Loads while the first frame is captured.
    let _loader = ocr.start_async();

    let mut app = App::new(&settings, Box::new(SystemClipboard::new())).with_translation(false);
    app.dispatch(Action::SwitchMode(Mode::Camera));
    if args.hanzi && app.core().camera().show_pinyin() {
        app.dispatch(Action::Camera(camera::Action::TogglePinyin));
    }
    let converter: PinyinConverter = app.converter();
    let mut throttle = FrameThrottle::new(interval);
    let mut ticker = tokio::time::interval(Duration::from_millis(100).min(interval.max(Duration::from_millis(1))));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    eprintln!("Recognizing the screen every {interval:?}. Press Ctrl-C to stop.");
    let mut shown: Option<Vec<bb_app::HanziBox>> = None;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            _ = ticker.tick() => {
                let now = Instant::now();
                app.tick(now);
                if !throttle.try_accept(now) {
                    continue;
                }
                let frame = match ocr.recognize_screen(converter).await {
                    Ok(frame) => frame,
                    Err(e @ AppError::OcrUnavailable(_)) => return Err(e),
                    Err(e) => {
                        log::warn!("{e}");
                        continue;
                    }
                };
                app.dispatch(Action::Camera(camera::Action::LiveFrameRecognized {
                    boxes: frame.boxes,
                    frame_size: frame.frame_size,
                }));

                if shown.as_deref() == Some(app.visible_boxes()) {
                    continue;
                }
                shown = Some(app.visible_boxes().to_vec());
                let show_pinyin = app.core().camera().show_pinyin();
                println!("--- {} box(es)", app.visible_boxes().len());
                print!("{}", render_boxes(app.visible_boxes(), show_pinyin));
                if let Some(view) = args.view {
                    let items = layout_overlay(
                        app.visible_boxes(),
                        &layout_params(SizeF::from(frame.frame_size), view, true, show_pinyin),
                        &EstimatedMeasure,
                    );
                    print!("{}", render_layout(&items));
                }
            }
        }
    }
    ocr.stop();
    Ok(())
}

fn run_settings(config: &ConfigManager, command: SettingsCommand) -> AppResult<()> {
    match command {
        SettingsCommand::Show => {
            let json = serde_json::to_string_pretty(&config.get()).map_err(anyhow::Error::from)?;
            println!("{json}");
        }
        SettingsCommand::Set { key, value } => {
            config.update(|s| s.set(&key, &value))?;
            eprintln!("Saved {key} to {}", config.path().display());
        }
        SettingsCommand::Path => println!("{}", config.path().display()),
    }
    Ok(())
}

pub async fn run(cli: Cli) -> AppResult<()> {
    let config = ConfigManager::new();
    log::debug!("settings: {}", config.path().display());

    match cli.command {
        Command::Text(args) => run_text(&config, args).await,
        Command::Watch(args) => run_watch(&config, args).await,
        Command::Scan(args) => run_scan(&config, args).await,
        Command::Live(args) => run_live(&config, args).await,
        Command::Settings(command) => run_settings(&config, command),
    }
}
