//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible
//! defaults. These builders allow tests to specify only the relevant
//! fields while using defaults for everything else.

use chrono::NaiveDate;
use core_kernel::{AgencyId, Currency, Money};
use domain_billing::{CourseItem, Quotation, ServiceItem};
use domain_campaign::{CampaignForm, FieldDefinition, FieldType};
use domain_lead::{Lead, LeadSource, StudyLevel, StudyPreference};
use rust_decimal_macros::dec;

use crate::fixtures::{IdFixtures, StringFixtures, TemporalFixtures};

/// Builder for constructing test leads
pub struct TestLeadBuilder {
    lead_number: String,
    name: String,
    email: String,
    country: String,
    level: StudyLevel,
    source: LeadSource,
}

impl Default for TestLeadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestLeadBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            lead_number: StringFixtures::lead_number().to_string(),
            name: "Ayesha Khan".to_string(),
            email: "ayesha@example.com".to_string(),
            country: "United Kingdom".to_string(),
            level: StudyLevel::Postgraduate,
            source: LeadSource::Website,
        }
    }

    /// Sets the lead number
    pub fn with_lead_number(mut self, number: impl Into<String>) -> Self {
        self.lead_number = number.into();
        self
    }

    /// Sets the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the destination country
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = country.into();
        self
    }

    /// Sets the enquiry source
    pub fn with_source(mut self, source: LeadSource) -> Self {
        self.source = source;
        self
    }

    /// Builds the lead
    pub fn build(self) -> Lead {
        Lead::new(
            self.lead_number,
            self.name,
            self.email,
            self.country,
            StudyPreference {
                level: self.level,
                field_of_study: "Computer Science".to_string(),
                intake: "Fall 2026".to_string(),
            },
            self.source,
        )
        .expect("builder defaults must be valid")
    }
}

/// Builder for constructing test quotations
pub struct TestQuotationBuilder {
    quotation_number: String,
    student_name: String,
    student_email: String,
    agency_id: AgencyId,
    currency: Currency,
    course_fee: Money,
    services: Vec<(String, Money)>,
    discount: Option<Money>,
    valid_until: NaiveDate,
}

impl Default for TestQuotationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestQuotationBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            quotation_number: StringFixtures::quotation_number().to_string(),
            student_name: "Ayesha Khan".to_string(),
            student_email: StringFixtures::student_email().to_string(),
            agency_id: IdFixtures::agency_id(),
            currency: Currency::GBP,
            course_fee: Money::new(dec!(24000), Currency::GBP),
            services: Vec::new(),
            discount: None,
            valid_until: TemporalFixtures::validity_date(),
        }
    }

    /// Sets the quotation number
    pub fn with_quotation_number(mut self, number: impl Into<String>) -> Self {
        self.quotation_number = number.into();
        self
    }

    /// Sets the course fee (and the quotation currency with it)
    pub fn with_course_fee(mut self, fee: Money) -> Self {
        self.currency = fee.currency();
        self.course_fee = fee;
        self
    }

    /// Adds a service fee line
    pub fn with_service(mut self, label: impl Into<String>, amount: Money) -> Self {
        self.services.push((label.into(), amount));
        self
    }

    /// Sets the discount
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Sets the issuing agency
    pub fn with_agency(mut self, agency_id: AgencyId) -> Self {
        self.agency_id = agency_id;
        self
    }

    /// Builds the quotation
    pub fn build(self) -> Quotation {
        let mut quotation = Quotation::new(
            self.quotation_number,
            self.student_name,
            self.student_email,
            self.agency_id,
            CourseItem {
                institution: "University of Manchester".to_string(),
                course_name: "MSc Data Science".to_string(),
                fee: self.course_fee,
            },
            self.valid_until,
        );
        for (label, amount) in self.services {
            quotation
                .add_service(ServiceItem::new(label, amount))
                .expect("builder services must match the quotation currency");
        }
        if let Some(discount) = self.discount {
            quotation
                .set_discount(discount)
                .expect("builder discount must not exceed the gross amount");
        }
        quotation
    }
}

/// Builder for constructing test campaign forms
pub struct TestFormBuilder {
    title: String,
    slug: String,
    author_email: String,
    fields: Vec<FieldDefinition>,
}

impl Default for TestFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFormBuilder {
    /// Creates a new builder with a single required text field
    pub fn new() -> Self {
        Self {
            title: "Eid Offer".to_string(),
            slug: StringFixtures::slug().to_string(),
            author_email: "marketing@agency.pk".to_string(),
            fields: vec![FieldDefinition::new("Name", "name", FieldType::Text, true)],
        }
    }

    /// Sets the slug
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    /// Sets the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Replaces the field list
    pub fn with_fields(mut self, fields: Vec<FieldDefinition>) -> Self {
        self.fields = fields;
        self
    }

    /// Appends a field
    pub fn add_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Builds the form, panicking on invalid shape
    pub fn build(self) -> CampaignForm {
        CampaignForm::new(self.title, self.slug, self.author_email, self.fields)
            .expect("builder defaults must be valid")
    }

    /// Builds the form, returning the validation error
    pub fn try_build(self) -> Result<CampaignForm, domain_campaign::CampaignError> {
        CampaignForm::new(self.title, self.slug, self.author_email, self.fields)
    }
}
