use std::fmt::Write as _;

use crate::User;
use crate::teams::Team;

/// Shown wherever a billing action would start a payment flow.
pub const BILLING_PENDING_NOTICE: &str =
    "Billing integration pending. This feature will be available once billing is configured.";

/// What the billing page shows to a given caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingPage {
    /// No current team, or the current team is not the requested one.
    NoTeamSelected,
    NotTeamLeader,
    Overview { team_name: String },
}

impl BillingPage {
    pub fn resolve(current_user: &User, current_team: Option<&Team>, team_slug: &str) -> Self {
        match current_team {
            Some(team) if team.slug == team_slug => {
                if team.is_leader(current_user.id) {
                    Self::Overview {
                        team_name: team.name.clone(),
                    }
                } else {
                    Self::NotTeamLeader
                }
            }
            _ => Self::NoTeamSelected,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview { .. } => "Your Billing",
            Self::NoTeamSelected | Self::NotTeamLeader => "Billing",
        }
    }

    /// Renders a standalone HTML document. Buttons are disabled and carry
    /// [`BILLING_PENDING_NOTICE`] as their title.
    pub fn to_html(&self) -> String {
        let mut body = String::new();

        match self {
            Self::NoTeamSelected => {
                body.push_str("<p>You did not select any team.</p>\n");
                body.push_str(
                    "<p>To access this page, please select existing team or create new team if you have no teams.</p>\n",
                );
            }
            Self::NotTeamLeader => {
                body.push_str("<p>Only the Team Leader can access this page.</p>\n");
                body.push_str("<p>Create your own team to become a Team Leader.</p>\n");
            }
            Self::Overview { team_name } => {
                let _ = writeln!(body, "<h3>Your Billing</h3>");
                let _ = writeln!(body, "<p class=\"team\">{}</p>", escape_html(team_name));

                body.push_str("<h4>Paid plan</h4>\n");
                body.push_str("<p>You are not a paying customer.</p>\n");
                body.push_str(
                    "<p>Buy subscription to enable team features. Billing integration is pending configuration.</p>\n",
                );
                body.push_str(&pending_button("Buy subscription"));

                body.push_str("<h4>Card information</h4>\n");
                body.push_str("<p>You have not added a card.</p>\n");
                body.push_str(&pending_button("Add card"));

                body.push_str("<h4>Payment history</h4>\n");
                body.push_str(&pending_button("Show payment history"));
                body.push_str("<p>Payment history will appear here once billing is configured.</p>\n");
            }
        }

        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<div class=\"billing\">\n{body}</div>\n</body>\n</html>\n",
            self.title()
        )
    }
}

fn pending_button(label: &str) -> String {
    format!(
        "<button type=\"button\" disabled title=\"{}\">{}</button>\n",
        escape_html(BILLING_PENDING_NOTICE),
        escape_html(label)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
