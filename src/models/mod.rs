//! Modelos del sistema
//!
//! Este módulo contiene los documentos que se guardan en la base de datos
//! y los requests validados que los crean.

pub mod contact;
pub mod news;
pub mod testimonial;
pub mod user;
pub mod vehicle;
