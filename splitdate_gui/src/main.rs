//! # Split Date GUI Application
//!
//! Renders every date question of a form as a month picker plus day and year
//! boxes, validating each group as it is typed into. Submit runs the form's
//! data type checks; Save writes the accepted answers to disk.
//!
//! ```text
//! splitdate_gui [FORM.json] [--answers answers.json]
//! ```

mod ui;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use iced::widget::{column, container, row, scrollable, Column, Space};
use iced::{Element, Length, Task};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use splitdate_core::wire;
use splitdate_core::{
    load_answers, load_form_definition, save_answers, Answers, DataTypeRegistry, DatePart,
    DateResult, Form, FormDefinition, FormErrors,
};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Fill a split date form", long_about = None)]
struct Args {
    /// Form definition file; the built-in sample when omitted
    form: Option<PathBuf>,

    /// Answers file to prefill from and save to
    #[arg(long)]
    answers: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// A sub-field of the group `id` changed
    PartChanged {
        id: String,
        part: DatePart,
        value: String,
    },
    Submit,
    SaveAnswers,
    Reset,
}

/// Outcome of the last Submit
pub type Submission = Result<Answers, FormErrors>;

pub struct App {
    registry: DataTypeRegistry,
    definition: FormDefinition,
    form: Form,
    form_path: Option<PathBuf>,
    answers_path: Option<PathBuf>,
    submission: Option<Submission>,
    status: String,
}

impl App {
    fn new(args: &Args) -> Self {
        let registry = DataTypeRegistry::with_builtin();
        let today = wire::today();

        let (definition, mut status) = match &args.form {
            Some(path) => match load_form_definition(path) {
                Ok(definition) => (definition, format!("Loaded {}", path.display())),
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "falling back to the sample form");
                    (FormDefinition::sample(), format!("Could not load form: {}", err))
                }
            },
            None => (FormDefinition::sample(), "Sample form".to_string()),
        };

        let prior = args.answers.as_deref().and_then(|path| load_prior(path, &mut status));
        let form = match Form::from_definition(&definition, &registry, prior.as_ref(), today) {
            Ok(form) => form,
            Err(err) => {
                status = format!("Invalid form: {}", err);
                Form::new(definition.title.clone(), today)
            }
        };

        App {
            registry,
            definition,
            form,
            form_path: args.form.clone(),
            answers_path: args.answers.clone(),
            submission: None,
            status,
        }
    }

    fn title(&self) -> String {
        format!("Split Date - {}", self.form.title())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PartChanged { id, part, value } => {
                if let Err(err) = self.form.change(&id, part, &value) {
                    self.status = err.to_string();
                }
                self.submission = None;
            }
            Message::Submit => {
                let submission = self.form.submit(&self.registry);
                self.status = match &submission {
                    Ok(answers) => format!("Accepted {} answer(s)", answers.values.len()),
                    Err(errors) => errors.to_string(),
                };
                self.submission = Some(submission);
            }
            Message::SaveAnswers => self.save(),
            Message::Reset => match self.rebuild(self.form.today()) {
                Ok(form) => {
                    self.form = form;
                    self.submission = None;
                    self.status = "Cleared".to_string();
                }
                Err(err) => self.status = format!("Invalid form: {}", err),
            },
        }
        Task::none()
    }

    fn rebuild(&self, today: NaiveDate) -> DateResult<Form> {
        Form::from_definition(&self.definition, &self.registry, None, today)
    }

    fn save(&mut self) {
        let Some(Ok(answers)) = &self.submission else {
            self.status = "Submit the form before saving".to_string();
            return;
        };
        let Some(path) = &self.answers_path else {
            self.status = "Start with --answers FILE to save answers".to_string();
            return;
        };
        self.status = match save_answers(answers, path) {
            Ok(()) => {
                info!(path = %path.display(), "answers saved");
                format!("Saved {}", path.display())
            }
            Err(err) => err.to_string(),
        };
    }

    fn can_save(&self) -> bool {
        matches!(self.submission, Some(Ok(_))) && self.answers_path.is_some()
    }

    fn view(&self) -> Element<'_, Message> {
        let fields = Column::with_children(self.form.widgets().map(|widget| {
            ui::split_date::view(
                widget,
                self.form.label(widget.id()).unwrap_or_default(),
                self.form.group_state(widget.id()),
            )
        }))
        .spacing(16);

        let input_panel = container(scrollable(fields.padding(8)))
            .width(Length::FillPortion(60))
            .style(container::bordered_box)
            .padding(5);

        let content = row![
            input_panel,
            ui::results_panel::view_results_panel(&self.submission, 0.6),
        ]
        .spacing(8)
        .height(Length::Fill);

        column![
            ui::toolbar::view_header(self.form.title()),
            ui::toolbar::view_toolbar(self.can_save()),
            Space::new().height(4),
            content,
            ui::status_bar::view_status_bar(&self.form_path, &self.answers_path, &self.status),
        ]
        .padding(10)
        .spacing(4)
        .into()
    }
}

fn load_prior(path: &Path, status: &mut String) -> Option<Answers> {
    if !path.exists() {
        return None;
    }
    match load_answers(path) {
        Ok(answers) => Some(answers),
        Err(err) => {
            *status = format!("Could not load answers: {}", err);
            None
        }
    }
}

fn main() -> iced::Result {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    iced::application(move || App::new(&args), App::update, App::view)
        .title(App::title)
        .window_size((760.0, 620.0))
        .run()
}
