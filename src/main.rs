use std::path::PathBuf;

use iced::widget::canvas::Canvas;
use iced::widget::{button, column, container, image, row, text, Column, Row, Space};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::FileDialog;

mod enhance;
mod media;
mod state;
mod ui;

use enhance::client::{EnhanceClient, EnhanceError};
use enhance::prompts::QualityTier;
use state::app::{AppState, Phase};
use state::image::{save_file_name, LoadError, UploadedImage};
use ui::compare::CompareSlider;

/// Main application state
struct PhotoRestore {
    /// The restoration session state machine
    session: AppState,
    /// Client for the remote enhancement provider
    client: EnhanceClient,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Choose Photo" button
    PickFile,
    /// Background file load completed
    FileLoaded(Result<UploadedImage, LoadError>),
    /// User picked a quality tier
    QualitySelected(QualityTier),
    /// User clicked the "Enhance Photo" button
    RequestEnhance,
    /// The enhancement call completed; `token` identifies the request
    EnhanceFinished {
        token: u64,
        result: Result<String, EnhanceError>,
    },
    /// The comparison slider boundary moved
    SliderMoved(f32),
    /// User clicked the "Save Enhanced Photo" button
    SaveEnhanced,
    /// Background save completed
    SaveFinished(Result<PathBuf, String>),
    /// User dismissed the error banner
    DismissError,
    /// User clicked one of the start-over buttons
    Reset,
}

impl PhotoRestore {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        // Without a key the provider rejects every call, so treat a missing
        // key as a fatal startup condition rather than a runtime error
        let api_key = std::env::var("GEMINI_API_KEY")
            .expect("GEMINI_API_KEY environment variable not set");

        println!("🖼️  Photo Restore ready");

        (
            PhotoRestore {
                session: AppState::new(),
                client: EnhanceClient::new(api_key),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                // Show the native file picker, restricted to accepted formats
                let file = FileDialog::new()
                    .set_title("Select a Photo to Restore")
                    .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
                    .pick_file();

                if let Some(path) = file {
                    return Task::perform(UploadedImage::load(path), Message::FileLoaded);
                }

                Task::none()
            }
            Message::FileLoaded(Ok(image)) => {
                self.session.select_succeeded(image);
                Task::none()
            }
            Message::FileLoaded(Err(err)) => {
                eprintln!("⚠️  File selection failed: {err:?}");
                self.session.surface_error(err.to_string());
                Task::none()
            }
            Message::QualitySelected(tier) => {
                self.session.set_quality(tier);
                Task::none()
            }
            Message::RequestEnhance => {
                let Some(request) = self.session.begin_enhance() else {
                    return Task::none();
                };

                let client = self.client.clone();
                let token = request.token;

                Task::perform(
                    async move {
                        client
                            .enhance(&request.payload, request.media_type, request.tier)
                            .await
                    },
                    move |result| Message::EnhanceFinished { token, result },
                )
            }
            Message::EnhanceFinished { token, result } => {
                match result {
                    Ok(payload) => {
                        self.session.enhance_succeeded(token, payload);
                    }
                    Err(err) => {
                        eprintln!("⚠️  Enhancement failed: {err:?}");
                        self.session
                            .enhance_failed(token, format!("Could not enhance the photo. {err}"));
                    }
                }
                Task::none()
            }
            Message::SliderMoved(position) => {
                self.session.set_compare_position(position);
                Task::none()
            }
            Message::SaveEnhanced => {
                let (Some(original), Some(enhanced)) =
                    (self.session.original(), self.session.enhanced())
                else {
                    return Task::none();
                };

                let file = FileDialog::new()
                    .set_title("Save Enhanced Photo")
                    .set_file_name(save_file_name(&original.file_name))
                    .save_file();

                if let Some(path) = file {
                    return Task::perform(
                        save_bytes(path, enhanced.bytes.clone()),
                        Message::SaveFinished,
                    );
                }

                Task::none()
            }
            Message::SaveFinished(Ok(path)) => {
                println!("💾 Saved enhanced photo to {}", path.display());
                Task::none()
            }
            Message::SaveFinished(Err(message)) => {
                self.session.surface_error(message);
                Task::none()
            }
            Message::DismissError => {
                self.session.clear_error();
                Task::none()
            }
            Message::Reset => {
                self.session.reset();
                Task::none()
            }
        }
    }

    /// Build the user interface for the current phase
    fn view(&self) -> Element<Message> {
        let mut content = Column::new()
            .spacing(24)
            .padding(32)
            .align_x(Alignment::Center)
            .push(text("Photo Restore").size(40));

        if let Some(message) = self.session.error() {
            content = content.push(error_banner(message));
        }

        content = content.push(match self.session.phase() {
            Phase::Idle => self.view_upload(),
            Phase::Previewing => self.view_preview(),
            Phase::Enhancing => self.view_enhancing(),
            Phase::Comparing => self.view_compare(),
        });

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }

    fn view_upload(&self) -> Element<Message> {
        column![
            text("Choose a photo to restore").size(24),
            button(text("Choose Photo").size(18))
                .on_press(Message::PickFile)
                .padding(12),
            text("JPEG, PNG or WebP up to 10 MB").size(14),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .into()
    }

    fn view_preview(&self) -> Element<Message> {
        let Some(original) = self.session.original() else {
            return self.view_upload();
        };

        let mut tiers = Row::new().spacing(8);
        for tier in QualityTier::ALL {
            let style: fn(&Theme, button::Status) -> button::Style =
                if tier == self.session.quality() {
                    button::primary
                } else {
                    button::secondary
                };

            tiers = tiers.push(
                button(text(tier.label()).size(14))
                    .on_press(Message::QualitySelected(tier))
                    .style(style),
            );
        }

        column![
            text("Your photo").size(24),
            image(original.handle.clone()).height(Length::Fixed(380.0)),
            text("Enhancement quality").size(18),
            tiers,
            text(self.session.quality().description()).size(14),
            row![
                button(text("Enhance Photo").size(18))
                    .on_press(Message::RequestEnhance)
                    .padding(12),
                button(text("Start Over").size(16))
                    .on_press(Message::Reset)
                    .style(button::secondary),
            ]
            .spacing(16)
            .align_y(Alignment::Center),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .into()
    }

    fn view_enhancing(&self) -> Element<Message> {
        let Some(original) = self.session.original() else {
            return self.view_upload();
        };

        column![
            text("Enhancement in progress...").size(24),
            image(original.handle.clone())
                .height(Length::Fixed(380.0))
                .opacity(0.3),
            text("The AI is working its magic. Please wait.").size(16),
        ]
        .spacing(16)
        .align_x(Alignment::Center)
        .into()
    }

    fn view_compare(&self) -> Element<Message> {
        let (Some(original), Some(enhanced)) =
            (self.session.original(), self.session.enhanced())
        else {
            return self.view_upload();
        };

        let slider = Canvas::new(CompareSlider {
            original: original.handle.clone(),
            enhanced: enhanced.handle.clone(),
            position: self.session.compare_position(),
        })
        .width(Length::Fixed(880.0))
        .height(Length::Fixed(520.0));

        column![
            text("Comparison slider").size(24),
            text("Drag the slider to compare the images.").size(14),
            row![
                text("Enhanced").size(14),
                Space::with_width(Length::Fill),
                text("Original").size(14),
            ]
            .width(Length::Fixed(880.0)),
            slider,
            row![
                button(text("Save Enhanced Photo").size(18))
                    .on_press(Message::SaveEnhanced)
                    .padding(12),
                button(text("Restore Another Photo").size(16))
                    .on_press(Message::Reset)
                    .style(button::secondary),
            ]
            .spacing(16)
            .align_y(Alignment::Center),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Non-modal, dismissible error banner shown above the main content
fn error_banner(message: &str) -> Element<Message> {
    container(
        row![
            text(message.to_string()).size(16),
            button(text("Dismiss").size(14))
                .on_press(Message::DismissError)
                .style(button::danger),
        ]
        .spacing(16)
        .align_y(Alignment::Center),
    )
    .padding(12)
    .style(container::bordered_box)
    .into()
}

/// Write the enhanced image to the chosen path in the background
async fn save_bytes(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, String> {
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(|e| format!("Could not save the file: {e}"))?;

    Ok(path)
}

fn main() -> iced::Result {
    // A .env file is optional; the variable itself is checked at startup
    let _ = dotenvy::dotenv();

    iced::application("Photo Restore", PhotoRestore::update, PhotoRestore::view)
        .theme(PhotoRestore::theme)
        .centered()
        .run_with(PhotoRestore::new)
}
