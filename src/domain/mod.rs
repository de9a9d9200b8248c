pub mod category;
pub mod result;

pub use category::{Category, UnknownCategory};
pub use result::{
    BoardingPass, CategoryGroup, CategoryItem, ClassificationResult, CreditCard, CreditCardSlip,
    CruiseId, CruiseSchedule, Factura, FileRef, ItemView, OtherDocument, Passport, PosReceipt,
    Side,
};
