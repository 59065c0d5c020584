//! Email templates, one type per event. All free-text values are expected
//! to be sanitized before they reach a template; templates only do layout.

use rust_decimal::Decimal;

/// A renderable transactional email
pub trait EmailTemplate: Send + Sync {
    fn subject(&self) -> String;
    fn html(&self) -> String;
    fn text(&self) -> String;
}

/// Shared HTML shell so every message looks the same in a mail client
fn layout(title: &str, body: &str) -> String {
    format!(
        "<html><body style=\"font-family: sans-serif; color: #222;\">\
         <h2>{title}</h2>{body}\
         <hr><p style=\"font-size: 12px; color: #888;\">\
         Ce message a été envoyé automatiquement, merci de ne pas y répondre.</p>\
         </body></html>"
    )
}

// --- Testimonies ---

pub struct TestimonyAck {
    pub author_name: String,
}

impl EmailTemplate for TestimonyAck {
    fn subject(&self) -> String {
        "Votre témoignage a bien été reçu".to_string()
    }

    fn html(&self) -> String {
        layout(
            "Merci pour votre témoignage",
            &format!(
                "<p>Bonjour {},</p>\
                 <p>Nous avons bien reçu votre témoignage. Il sera publié sur le site \
                 après validation par notre équipe.</p>",
                self.author_name
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Bonjour {},\n\nNous avons bien reçu votre témoignage. Il sera publié \
             sur le site après validation par notre équipe.\n",
            self.author_name
        )
    }
}

pub struct TestimonyAdminAlert {
    pub author_name: String,
    pub author_role: String,
    pub content: String,
}

impl EmailTemplate for TestimonyAdminAlert {
    fn subject(&self) -> String {
        format!("Nouveau témoignage de {}", self.author_name)
    }

    fn html(&self) -> String {
        layout(
            "Nouveau témoignage à modérer",
            &format!(
                "<p><strong>Auteur :</strong> {} ({})</p><blockquote>{}</blockquote>",
                self.author_name, self.author_role, self.content
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Nouveau témoignage à modérer\n\nAuteur : {} ({})\n\n{}\n",
            self.author_name, self.author_role, self.content
        )
    }
}

/// Moderation outcome notice sent to the author
pub struct TestimonyModerated {
    pub author_name: String,
    pub approved: bool,
}

impl EmailTemplate for TestimonyModerated {
    fn subject(&self) -> String {
        if self.approved {
            "Votre témoignage a été publié".to_string()
        } else {
            "Votre témoignage n'a pas été retenu".to_string()
        }
    }

    fn html(&self) -> String {
        let body = if self.approved {
            format!(
                "<p>Bonjour {},</p><p>Votre témoignage a été validé et est \
                 désormais visible sur le site. Merci pour votre contribution.</p>",
                self.author_name
            )
        } else {
            format!(
                "<p>Bonjour {},</p><p>Après relecture, votre témoignage n'a pas pu \
                 être publié. N'hésitez pas à nous contacter pour en savoir plus.</p>",
                self.author_name
            )
        };
        layout("Votre témoignage", &body)
    }

    fn text(&self) -> String {
        if self.approved {
            format!(
                "Bonjour {},\n\nVotre témoignage a été validé et est désormais \
                 visible sur le site. Merci pour votre contribution.\n",
                self.author_name
            )
        } else {
            format!(
                "Bonjour {},\n\nAprès relecture, votre témoignage n'a pas pu être \
                 publié. N'hésitez pas à nous contacter pour en savoir plus.\n",
                self.author_name
            )
        }
    }
}

// --- Memberships ---

pub struct MembershipAck {
    pub first_name: String,
}

impl EmailTemplate for MembershipAck {
    fn subject(&self) -> String {
        "Votre demande d'adhésion a bien été reçue".to_string()
    }

    fn html(&self) -> String {
        layout(
            "Bienvenue !",
            &format!(
                "<p>Bonjour {},</p>\
                 <p>Nous avons bien reçu votre demande d'adhésion. Nous revenons \
                 vers vous très vite pour finaliser votre inscription.</p>",
                self.first_name
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Bonjour {},\n\nNous avons bien reçu votre demande d'adhésion. Nous \
             revenons vers vous très vite pour finaliser votre inscription.\n",
            self.first_name
        )
    }
}

pub struct MembershipAdminAlert {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub membership_type: String,
}

impl EmailTemplate for MembershipAdminAlert {
    fn subject(&self) -> String {
        format!("Nouvelle adhésion : {} {}", self.first_name, self.last_name)
    }

    fn html(&self) -> String {
        layout(
            "Nouvelle demande d'adhésion",
            &format!(
                "<p><strong>Nom :</strong> {} {}</p>\
                 <p><strong>Email :</strong> {}</p>\
                 <p><strong>Formule :</strong> {}</p>",
                self.first_name, self.last_name, self.email, self.membership_type
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Nouvelle demande d'adhésion\n\nNom : {} {}\nEmail : {}\nFormule : {}\n",
            self.first_name, self.last_name, self.email, self.membership_type
        )
    }
}

// --- Pre-memberships ---

pub struct PreMembershipAck {
    pub name: String,
}

impl EmailTemplate for PreMembershipAck {
    fn subject(&self) -> String {
        "Merci pour votre soutien".to_string()
    }

    fn html(&self) -> String {
        layout(
            "Merci pour votre soutien",
            &format!(
                "<p>Bonjour {},</p>\
                 <p>Votre pré-adhésion est enregistrée. Nous vous tiendrons informé \
                 dès la constitution officielle de l'association.</p>",
                self.name
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Bonjour {},\n\nVotre pré-adhésion est enregistrée. Nous vous tiendrons \
             informé dès la constitution officielle de l'association.\n",
            self.name
        )
    }
}

pub struct PreMembershipAdminAlert {
    pub name: String,
    pub email: String,
    pub city: Option<String>,
}

impl EmailTemplate for PreMembershipAdminAlert {
    fn subject(&self) -> String {
        format!("Nouvelle pré-adhésion : {}", self.name)
    }

    fn html(&self) -> String {
        let city = self.city.as_deref().unwrap_or("non renseignée");
        layout(
            "Nouvelle pré-adhésion",
            &format!(
                "<p><strong>Nom :</strong> {}</p>\
                 <p><strong>Email :</strong> {}</p>\
                 <p><strong>Ville :</strong> {}</p>",
                self.name, self.email, city
            ),
        )
    }

    fn text(&self) -> String {
        let city = self.city.as_deref().unwrap_or("non renseignée");
        format!(
            "Nouvelle pré-adhésion\n\nNom : {}\nEmail : {}\nVille : {}\n",
            self.name, self.email, city
        )
    }
}

// --- Contact ---

pub struct ContactAck {
    pub name: String,
    pub subject_line: String,
}

impl EmailTemplate for ContactAck {
    fn subject(&self) -> String {
        "Nous avons bien reçu votre message".to_string()
    }

    fn html(&self) -> String {
        layout(
            "Message bien reçu",
            &format!(
                "<p>Bonjour {},</p>\
                 <p>Votre message « {} » a bien été transmis à notre équipe. Nous \
                 vous répondrons dans les meilleurs délais.</p>",
                self.name, self.subject_line
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Bonjour {},\n\nVotre message « {} » a bien été transmis à notre \
             équipe. Nous vous répondrons dans les meilleurs délais.\n",
            self.name, self.subject_line
        )
    }
}

pub struct ContactAdminAlert {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
}

impl EmailTemplate for ContactAdminAlert {
    fn subject(&self) -> String {
        format!("Contact : {}", self.subject)
    }

    fn html(&self) -> String {
        layout(
            "Nouveau message de contact",
            &format!(
                "<p><strong>De :</strong> {} &lt;{}&gt;</p>\
                 <p><strong>Sujet :</strong> {}</p><blockquote>{}</blockquote>",
                self.name, self.email, self.subject, self.body
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Nouveau message de contact\n\nDe : {} <{}>\nSujet : {}\n\n{}\n",
            self.name, self.email, self.subject, self.body
        )
    }
}

// --- Donations ---

pub struct DonationAck {
    pub donor_name: String,
    pub amount: Decimal,
}

impl EmailTemplate for DonationAck {
    fn subject(&self) -> String {
        "Merci pour votre promesse de don".to_string()
    }

    fn html(&self) -> String {
        layout(
            "Merci pour votre générosité",
            &format!(
                "<p>Bonjour {},</p>\
                 <p>Nous avons bien enregistré votre promesse de don de {} €. Vous \
                 recevrez un reçu dès réception du règlement.</p>",
                self.donor_name, self.amount
            ),
        )
    }

    fn text(&self) -> String {
        format!(
            "Bonjour {},\n\nNous avons bien enregistré votre promesse de don de \
             {} €. Vous recevrez un reçu dès réception du règlement.\n",
            self.donor_name, self.amount
        )
    }
}

pub struct DonationAdminAlert {
    pub donor_name: String,
    pub email: String,
    pub amount: Decimal,
    pub message: Option<String>,
}

impl EmailTemplate for DonationAdminAlert {
    fn subject(&self) -> String {
        format!("Nouvelle promesse de don : {} €", self.amount)
    }

    fn html(&self) -> String {
        let message = self.message.as_deref().unwrap_or("(aucun message)");
        layout(
            "Nouvelle promesse de don",
            &format!(
                "<p><strong>Donateur :</strong> {} &lt;{}&gt;</p>\
                 <p><strong>Montant :</strong> {} €</p><blockquote>{}</blockquote>",
                self.donor_name, self.email, self.amount, message
            ),
        )
    }

    fn text(&self) -> String {
        let message = self.message.as_deref().unwrap_or("(aucun message)");
        format!(
            "Nouvelle promesse de don\n\nDonateur : {} <{}>\nMontant : {} €\n\n{}\n",
            self.donor_name, self.email, self.amount, message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn testimony_ack_mentions_moderation() {
        let tpl = TestimonyAck { author_name: "Jeanne".into() };
        assert!(tpl.html().contains("Jeanne"));
        assert!(tpl.text().contains("validation"));
    }

    #[test]
    fn admin_alert_carries_submission_data() {
        let tpl = ContactAdminAlert {
            name: "Jean".into(),
            email: "jean@example.com".into(),
            subject: "Stationnement".into(),
            body: "Question sur la rue principale".into(),
        };
        assert!(tpl.subject().contains("Stationnement"));
        assert!(tpl.html().contains("jean@example.com"));
        assert!(tpl.text().contains("rue principale"));
    }

    #[test]
    fn donation_templates_render_amount() {
        let amount = Decimal::from_str_exact("25.50").unwrap();
        let ack = DonationAck { donor_name: "Luc".into(), amount };
        let alert = DonationAdminAlert {
            donor_name: "Luc".into(),
            email: "luc@example.com".into(),
            amount,
            message: None,
        };
        assert!(ack.html().contains("25.50"));
        assert!(alert.subject().contains("25.50"));
        assert!(alert.text().contains("(aucun message)"));
    }

    #[test]
    fn moderation_outcome_differs() {
        let approved = TestimonyModerated { author_name: "A".into(), approved: true };
        let rejected = TestimonyModerated { author_name: "A".into(), approved: false };
        assert_ne!(approved.subject(), rejected.subject());
    }
}
