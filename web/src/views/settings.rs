use crate::components::Header;
use crate::state::{use_reminder_settings, use_theme};
use dioxus::prelude::*;

/// Theme and reminder preferences, saved locally per setting.
#[component]
pub fn SettingsPage() -> Element {
    let mut theme = use_theme();
    let mut reminders = use_reminder_settings();

    let is_dark = theme.get() == "dark";
    let reminder_settings = reminders.get();

    rsx! {
        div { class: "page",
            Header { title: "Settings" }

            div { class: "task-card settings-card",
                h3 { "Account & App Settings" }

                label { class: "setting-row",
                    input {
                        r#type: "checkbox",
                        checked: is_dark,
                        onchange: move |_| {
                            let next = if theme.get() == "dark" { "light" } else { "dark" };
                            theme.set(next.to_string());
                        },
                    }
                    "Use dark theme"
                }

                label { class: "setting-row",
                    input {
                        r#type: "checkbox",
                        checked: reminder_settings.enabled,
                        onchange: move |_| {
                            reminders.update(|settings| settings.enabled = !settings.enabled);
                        },
                    }
                    "Enable reminders"
                }

                label { class: "setting-row",
                    "Remind me (minutes before start)"
                    input {
                        r#type: "number",
                        min: 1,
                        value: "{reminder_settings.minutes_before}",
                        onchange: move |evt| {
                            if let Ok(minutes) = evt.value().parse::<u32>() {
                                reminders.update(|settings| settings.minutes_before = minutes);
                            }
                        },
                    }
                }

                p { class: "muted", "Settings are saved locally on this device." }
            }
        }
    }
}
