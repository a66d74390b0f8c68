use crate::form::{EnquiryForm, FormField, NotificationKind};
use crate::store::EnquiryStore;
use crate::validation::{is_valid_email, is_valid_phone};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

/// Runs the enquiry form as a line-based questionnaire
pub struct Questionnaire<R, W> {
    input: Lines<R>,
    output: W,
}

impl<R, W> Questionnaire<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: input.lines(),
            output,
        }
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    async fn say(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(format!("{}\n", text).as_bytes())
            .await
            .context("Failed to write to terminal")?;
        self.output.flush().await.context("Failed to flush terminal")?;
        Ok(())
    }

    /// Next trimmed line, `None` once input is exhausted
    async fn read_answer(&mut self) -> Result<Option<String>> {
        let line = self
            .input
            .next_line()
            .await
            .context("Failed to read from terminal")?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    async fn confirm(&mut self, question: &str, default: bool) -> Result<bool> {
        self.say(question).await?;
        Ok(match self.read_answer().await?.as_deref() {
            None => false,
            Some("") => default,
            Some(answer) => matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"),
        })
    }

    /// Ask until a non-empty answer comes back. Select inputs take the
    /// option number or the option value itself.
    async fn ask(&mut self, field: FormField) -> Result<Option<String>> {
        loop {
            match field.options() {
                None => self.say(&format!("{} ({}):", field.label(), field.prompt())).await?,
                Some(options) => {
                    self.say(&format!("{} - {}", field.label(), field.prompt())).await?;
                    for (i, (_, label)) in options.iter().enumerate() {
                        self.say(&format!("  {}) {}", i + 1, label)).await?;
                    }
                }
            }

            let Some(answer) = self.read_answer().await? else {
                return Ok(None);
            };

            let value = match field.options() {
                None if !answer.is_empty() => Some(answer),
                None => None,
                Some(options) => answer
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| options.get(i))
                    .or_else(|| options.iter().find(|(value, _)| *value == answer))
                    .map(|(value, _)| value.to_string()),
            };

            match value {
                Some(value) => return Ok(Some(value)),
                None => self.say("Please choose one of the listed answers.").await?,
            }
        }
    }

    /// Fill in and submit enquiries until the user stops or input ends.
    /// Returns how many enquiries were stored.
    pub async fn run(&mut self, form: &mut EnquiryForm, store: &dyn EnquiryStore) -> Result<usize> {
        self.say("Property Enquiry").await?;
        self.say("Please provide your details to help us find your future home.")
            .await?;

        let mut stored = 0;
        loop {
            for field in FormField::ALL {
                if !form.snapshot().get(field).is_empty() {
                    continue;
                }
                let Some(value) = self.ask(field).await? else {
                    debug!("Input closed before the form was complete");
                    return Ok(stored);
                };
                form.on_field_change(field, value);
            }

            let Some(note) = form.on_submit(store).await else {
                continue;
            };

            match note.kind {
                NotificationKind::Success => {
                    stored += 1;
                    self.say(&format!("✅ {}", note)).await?;
                    self.say("Thank You! Your enquiry has been received. Our property specialist will review your requirements and contact you shortly.")
                        .await?;
                    if !self.confirm("Submit another request? [y/N]", false).await? {
                        return Ok(stored);
                    }
                    form.on_reset();
                }
                NotificationKind::Error => {
                    self.say(&format!("❌ {}", note)).await?;
                    let snapshot = form.snapshot().clone();
                    if !is_valid_email(&snapshot.email) {
                        form.on_field_change(FormField::Email, "");
                    } else if !is_valid_phone(&snapshot.mobile) {
                        form.on_field_change(FormField::Mobile, "");
                    } else if !self.confirm("Try again? [Y/n]", true).await? {
                        return Ok(stored);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Budget, SiteVisit};
    use crate::store::MemoryStore;

    const ANSWERS: &str = "Asha Menon\nasha@example.com\n+91 98450 12345\n2\n2\nResidence\n2\n1\n3\n3\n";

    #[tokio::test]
    async fn full_session_stores_one_enquiry() {
        let store = MemoryStore::new();
        let mut form = EnquiryForm::new();
        let input = format!("{}n\n", ANSWERS);
        let mut session = Questionnaire::new(input.as_bytes(), Vec::new());

        let stored = session.run(&mut form, &store).await.unwrap();

        assert_eq!(stored, 1);
        let rows = store.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].record.budget, Budget::Mid);
        assert_eq!(rows[0].record.site_visit, SiteVisit::NotReady);

        let transcript = String::from_utf8(session.into_output()).unwrap();
        assert!(transcript.contains("  1) Cash buyer / Pre-approved"));
        assert!(transcript.contains("✅ Enquiry submitted successfully!"));
    }

    #[tokio::test]
    async fn bad_email_is_asked_again() {
        let store = MemoryStore::new();
        let mut form = EnquiryForm::new();
        let input = format!(
            "{}fixed@example.com\nn\n",
            ANSWERS.replace("asha@example.com", "asha-at-example")
        );
        let mut session = Questionnaire::new(input.as_bytes(), Vec::new());

        let stored = session.run(&mut form, &store).await.unwrap();

        assert_eq!(stored, 1);
        assert_eq!(store.rows()[0].record.email, "fixed@example.com");
        let transcript = String::from_utf8(session.into_output()).unwrap();
        assert!(transcript.contains("❌ Please enter a valid email address."));
    }

    #[tokio::test]
    async fn off_list_choice_is_rejected_until_valid() {
        let store = MemoryStore::new();
        let mut form = EnquiryForm::new();
        let input = format!(
            "{}n\n",
            ANSWERS.replacen("\n2\n2\n", "\n9\n2\n2\n", 1)
        );
        let mut session = Questionnaire::new(input.as_bytes(), Vec::new());

        assert_eq!(session.run(&mut form, &store).await.unwrap(), 1);
        let transcript = String::from_utf8(session.into_output()).unwrap();
        assert!(transcript.contains("Please choose one of the listed answers."));
    }

    #[tokio::test]
    async fn closed_input_stops_without_submitting() {
        let store = MemoryStore::new();
        let mut form = EnquiryForm::new();
        let mut session = Questionnaire::new("Asha Menon\n".as_bytes(), Vec::new());

        assert_eq!(session.run(&mut form, &store).await.unwrap(), 0);
        assert!(store.rows().is_empty());
        assert_eq!(form.snapshot().name, "Asha Menon");
    }
}
