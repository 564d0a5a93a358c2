pub mod maintenance_dto;
