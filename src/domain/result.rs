use serde::{Deserialize, Serialize};

use super::category::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRef<'a> {
    pub side: Option<Side>,
    pub filename: &'a str,
}

pub trait CategoryItem {
    fn id(&self) -> i64;

    fn files(&self) -> Vec<FileRef<'_>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditCard {
    pub card_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl CategoryItem for CreditCard {
    fn id(&self) -> i64 {
        self.card_id
    }

    fn files(&self) -> Vec<FileRef<'_>> {
        let mut files = Vec::with_capacity(2);
        if let Some(front) = self.front.as_deref() {
            files.push(FileRef {
                side: Some(Side::Front),
                filename: front,
            });
        }
        if let Some(back) = self.back.as_deref() {
            files.push(FileRef {
                side: Some(Side::Back),
                filename: back,
            });
        }
        if files.is_empty() {
            if let Some(filename) = self.filename.as_deref() {
                files.push(FileRef {
                    side: None,
                    filename,
                });
            }
        }
        files
    }
}

macro_rules! document_item {
    ($name:ident, $id:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub struct $name {
            pub $id: i64,
            pub filename: String,
        }

        impl CategoryItem for $name {
            fn id(&self) -> i64 {
                self.$id
            }

            fn files(&self) -> Vec<FileRef<'_>> {
                vec![FileRef {
                    side: None,
                    filename: &self.filename,
                }]
            }
        }
    };
}

document_item!(PosReceipt, pos_id);
document_item!(Factura, factura_id);
document_item!(CreditCardSlip, slip_id);
document_item!(Passport, passport_id);
document_item!(CruiseId, cruise_id);
document_item!(CruiseSchedule, schedule_id);
document_item!(BoardingPass, boarding_pass_id);
document_item!(OtherDocument, other_id);

/// An absent category and an empty one both mean "nothing classified here";
/// reconciliation always produces the absent form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_cards: Option<Vec<CreditCard>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_receipts: Option<Vec<PosReceipt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facturas: Option<Vec<Factura>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_slips: Option<Vec<CreditCardSlip>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passports: Option<Vec<Passport>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cruise_ids: Option<Vec<CruiseId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cruise_schedules: Option<Vec<CruiseSchedule>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boarding_passes: Option<Vec<BoardingPass>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_documents: Option<Vec<OtherDocument>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView<'a> {
    pub id: i64,
    pub files: Vec<FileRef<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    pub category: Category,
    pub items: Vec<ItemView<'a>>,
}

impl ClassificationResult {
    pub fn is_empty(&self) -> bool {
        self.groups().is_empty()
    }

    pub fn total_items(&self) -> usize {
        self.groups().iter().map(|group| group.items.len()).sum()
    }

    pub fn groups(&self) -> Vec<CategoryGroup<'_>> {
        Category::ALL
            .into_iter()
            .filter_map(|category| {
                let items = match category {
                    Category::CreditCards => views(&self.credit_cards),
                    Category::PosReceipts => views(&self.pos_receipts),
                    Category::Facturas => views(&self.facturas),
                    Category::CreditCardSlips => views(&self.credit_card_slips),
                    Category::Passports => views(&self.passports),
                    Category::CruiseIds => views(&self.cruise_ids),
                    Category::CruiseSchedules => views(&self.cruise_schedules),
                    Category::BoardingPasses => views(&self.boarding_passes),
                    Category::OtherDocuments => views(&self.other_documents),
                };
                (!items.is_empty()).then_some(CategoryGroup { category, items })
            })
            .collect()
    }

    pub fn referenced_filenames(&self) -> Vec<&str> {
        self.groups()
            .into_iter()
            .flat_map(|group| group.items)
            .flat_map(|item| item.files)
            .map(|file| file.filename)
            .collect()
    }

    pub fn normalized(mut self) -> Self {
        fn clear_empty<T>(slot: &mut Option<Vec<T>>) {
            if slot.as_ref().is_some_and(Vec::is_empty) {
                *slot = None;
            }
        }
        clear_empty(&mut self.credit_cards);
        clear_empty(&mut self.pos_receipts);
        clear_empty(&mut self.facturas);
        clear_empty(&mut self.credit_card_slips);
        clear_empty(&mut self.passports);
        clear_empty(&mut self.cruise_ids);
        clear_empty(&mut self.cruise_schedules);
        clear_empty(&mut self.boarding_passes);
        clear_empty(&mut self.other_documents);
        self
    }

    pub fn without_item(&self, category: Category, id: i64) -> Self {
        let mut next = self.clone();
        next.remove_in_place(category, id);
        next
    }

    // `None` when nothing matched. A category left without items is removed entirely.
    pub(crate) fn remove_in_place(&mut self, category: Category, id: i64) -> Option<Vec<String>> {
        match category {
            Category::CreditCards => remove_from(&mut self.credit_cards, id),
            Category::PosReceipts => remove_from(&mut self.pos_receipts, id),
            Category::Facturas => remove_from(&mut self.facturas, id),
            Category::CreditCardSlips => remove_from(&mut self.credit_card_slips, id),
            Category::Passports => remove_from(&mut self.passports, id),
            Category::CruiseIds => remove_from(&mut self.cruise_ids, id),
            Category::CruiseSchedules => remove_from(&mut self.cruise_schedules, id),
            Category::BoardingPasses => remove_from(&mut self.boarding_passes, id),
            Category::OtherDocuments => remove_from(&mut self.other_documents, id),
        }
    }
}

fn views<T: CategoryItem>(slot: &Option<Vec<T>>) -> Vec<ItemView<'_>> {
    slot.iter()
        .flatten()
        .map(|item| ItemView {
            id: item.id(),
            files: item.files(),
        })
        .collect()
}

fn remove_from<T: CategoryItem>(slot: &mut Option<Vec<T>>, id: i64) -> Option<Vec<String>> {
    let items = slot.as_mut()?;
    let mut matched = false;
    let mut removed = Vec::new();
    items.retain(|item| {
        if item.id() != id {
            return true;
        }
        matched = true;
        removed.extend(item.files().into_iter().map(|file| file.filename.to_string()));
        false
    });
    if !matched {
        return None;
    }
    if items.is_empty() {
        *slot = None;
    }
    Some(removed)
}
