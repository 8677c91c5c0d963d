pub mod answer_services;
